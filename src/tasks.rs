//! Background task management for non-blocking operations.
//!
//! Slow operations run in spawned tokio tasks while the UI keeps rendering.
//! Results come back to the main event loop over an unbounded channel, which
//! the loop drains with `try_recv()` once per iteration.
//!
//! The only operation today is the simulated delete: it sleeps for the
//! configured latency and then reports the request as done. The simulated
//! backend never fails.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::selection::DeleteRequest;

/// Messages sent from background tasks to the main event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskMessage {
    /// A simulated delete finished.
    DeleteCompleted(DeleteRequest),
}

/// Spawns background tasks that report back through a channel.
#[derive(Debug, Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<TaskMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<TaskMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a simulated delete that completes after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_delete(&self, request: DeleteRequest, delay: Duration) {
        let tx = self.tx.clone();
        debug!(count = request.len(), delay_ms = delay.as_millis() as u64, "Spawning delete");
        tokio::spawn(async move {
            simulate_latency(delay).await;
            trace!(?request, "Simulated delete finished");
            let _ = tx.send(TaskMessage::DeleteCompleted(request));
        });
    }
}

/// Wait out the simulated network latency.
async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<TaskMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
