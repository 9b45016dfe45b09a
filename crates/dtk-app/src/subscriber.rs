//! Domain event subscribers
//!
//! Slip generation runs here, decoupled from the routing engine: the
//! engine emits `DocumentCreated`, this task consumes it and invokes the
//! generator. A failing generation is logged and the loop continues; the
//! failure never reaches the creation that triggered it.

use dtk_engine::{DomainEvent, EventReceiver};
use dtk_services::SlipGenerator;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Spawn the tracking-slip subscriber.
///
/// Runs until the event channel closes (i.e. the engine side is dropped).
pub fn spawn_slip_subscriber(
    mut events: EventReceiver,
    generator: Arc<dyn SlipGenerator>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                DomainEvent::DocumentCreated { document } => {
                    match generator.generate(&document).await {
                        Ok(slip) => {
                            tracing::info!(
                                document = %document.id,
                                file = %slip.file_name,
                                "tracking slip generated"
                            );
                        }
                        Err(error) => {
                            tracing::warn!(
                                document = %document.id,
                                %error,
                                "tracking slip generation failed"
                            );
                        }
                    }
                }
            }
        }
        tracing::debug!("slip subscriber stopped");
    })
}
