//! Domain events emitted by the routing engine
//!
//! The engine never calls external services itself. It emits events on a
//! best-effort channel; subscribers (slip generation, for one) consume
//! them on their own tasks and fail independently. A missing or closed
//! subscriber never affects the document mutation that produced the event.

use dtk_domain::Document;
use tokio::sync::mpsc;

/// Something the routing engine did that the outside world may react to.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// A document was created and routed to its first office.
    ///
    /// The subscriber is expected to generate a tracking slip exactly once
    /// per creation.
    DocumentCreated { document: Document },
}

/// Sending half of the domain event channel.
pub type EventSender = mpsc::UnboundedSender<DomainEvent>;
/// Receiving half of the domain event channel.
pub type EventReceiver = mpsc::UnboundedReceiver<DomainEvent>;

/// Create a domain event channel.
#[must_use]
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
