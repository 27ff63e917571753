//! Event queue — broadcast channel between an executor and its consumers.
//!
//! Executors publish [`StreamResponse`] events; the transport subscribes and
//! forwards them to SSE streams or collects them for a synchronous reply.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::BridgeResult;
use crate::types::StreamResponse;

/// Default channel capacity for the event queue.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Event queue for publishing and subscribing to streaming events.
///
/// Built on a `tokio::sync::broadcast` channel, so several consumers can
/// independently receive events from one producer.
///
/// ```rust,ignore
/// let queue = EventQueue::new(256);
/// let mut rx = queue.subscribe();
///
/// // In the executor:
/// queue.enqueue_event(event).await?;
///
/// // In the consumer:
/// while let Ok(event) = rx.recv().await {
///     // forward event
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EventQueue {
    tx: broadcast::Sender<StreamResponse>,
    closed: Arc<AtomicBool>,
}

impl EventQueue {
    /// Create a new event queue with the given channel capacity.
    ///
    /// Slow consumers that fall more than `capacity` events behind receive
    /// `RecvError::Lagged`. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a new event queue with the default capacity.
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StreamResponse> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers.
    ///
    /// Events on a closed queue, or with no subscribers, are dropped with a
    /// warning; neither is an error.
    pub async fn enqueue_event(&self, event: StreamResponse) -> BridgeResult<()> {
        if self.closed.load(Ordering::Acquire) {
            warn!("Queue is closed. Event will not be enqueued.");
            return Ok(());
        }

        match self.tx.send(event) {
            Ok(count) => {
                debug!(subscriber_count = count, "Published event to queue");
            }
            Err(_) => {
                warn!("Failed to publish event (no subscribers)");
            }
        }
        Ok(())
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Close the queue; later events are dropped.
    pub fn close(&self) {
        debug!("Closing EventQueue.");
        self.closed.store(true, Ordering::Release);
    }

    /// Check if the queue has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
