//! QR scan intake
//!
//! Models the continuously scanning surface: a decoder feeds decoded text
//! payloads (document ids) into a channel, and the consumer drains them
//! until the surface closes. Dropping the feed handle is the cleanup: the
//! source then reports exhaustion and the intake loop ends.

use tokio::sync::mpsc;

/// Feeding half: held by the decoder. Dropping it stops the source.
#[derive(Debug, Clone)]
pub struct ScanFeed {
    tx: mpsc::UnboundedSender<String>,
}

impl ScanFeed {
    /// Push one decoded payload.
    ///
    /// Returns false when the consumer has already gone away.
    pub fn push(&self, payload: impl Into<String>) -> bool {
        self.tx.send(payload.into()).is_ok()
    }
}

/// Consuming half: yields decoded payloads until the feed is dropped.
#[derive(Debug)]
pub struct ScanSource {
    rx: mpsc::UnboundedReceiver<String>,
}

impl ScanSource {
    /// Next decoded payload, or `None` once the scanning surface closed.
    pub async fn next(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Non-blocking variant for synchronous callers.
    pub fn try_next(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}

/// Create a connected feed/source pair.
#[must_use]
pub fn scan_channel() -> (ScanFeed, ScanSource) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ScanFeed { tx }, ScanSource { rx })
}
