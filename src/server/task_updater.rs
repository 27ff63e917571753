//! Task updater — publishes task state transitions for one task.
//!
//! Once a task reaches a terminal state (completed, failed, canceled,
//! rejected) no further status updates are accepted.

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{BridgeError, BridgeResult};
use crate::types::{Message, Part, StreamResponse, TaskState, TaskStatus, TaskStatusUpdateEvent};
use crate::utils::{new_agent_parts_message, new_agent_text_message};

use super::event_queue::EventQueue;

/// Task state transition helper.
///
/// Wraps an [`EventQueue`] and tracks whether the task has reached a
/// terminal state. Safe to share across tasks via `Arc<TaskUpdater>`.
pub struct TaskUpdater {
    event_queue: EventQueue,
    task_id: String,
    context_id: String,
    terminal_reached: Mutex<bool>,
}

impl TaskUpdater {
    /// Create a new task updater for the given task and context IDs.
    pub fn new(
        event_queue: EventQueue,
        task_id: impl Into<String>,
        context_id: impl Into<String>,
    ) -> Self {
        Self {
            event_queue,
            task_id: task_id.into(),
            context_id: context_id.into(),
            terminal_reached: Mutex::new(false),
        }
    }

    /// Returns `true` if the task has reached a terminal state.
    pub async fn is_terminal(&self) -> bool {
        *self.terminal_reached.lock().await
    }

    /// Publish a status update event.
    ///
    /// Terminal states always publish with `final = true`.
    ///
    /// # Errors
    ///
    /// [`BridgeError::TaskState`] if the task has already reached a terminal
    /// state.
    pub async fn update_status(
        &self,
        task_state: TaskState,
        message: Option<Message>,
        r#final: bool,
        metadata: Option<serde_json::Value>,
    ) -> BridgeResult<()> {
        let is_terminal = task_state.is_terminal();

        // Drop the lock before awaiting the enqueue.
        {
            let mut terminal_reached = self.terminal_reached.lock().await;
            if *terminal_reached {
                warn!(
                    task_id = %self.task_id,
                    requested_state = %task_state,
                    "Attempted status update after terminal state"
                );
                return Err(BridgeError::TaskState(format!(
                    "task {} already reached a terminal state, cannot transition to {}",
                    self.task_id, task_state
                )));
            }
            if is_terminal {
                *terminal_reached = true;
            }
        }

        let event = StreamResponse::StatusUpdate(TaskStatusUpdateEvent {
            task_id: self.task_id.clone(),
            context_id: self.context_id.clone(),
            kind: "status-update".to_string(),
            status: TaskStatus {
                state: task_state,
                message,
                timestamp: Some(Utc::now().to_rfc3339()),
            },
            r#final: is_terminal || r#final,
            metadata,
        });

        self.event_queue.enqueue_event(event).await?;

        debug!(
            task_id = %self.task_id,
            state = %task_state,
            terminal = is_terminal,
            "Status update published"
        );

        Ok(())
    }

    /// Transition to `working`.
    pub async fn start_work(&self, message: Option<Message>) -> BridgeResult<()> {
        self.update_status(TaskState::Working, message, false, None)
            .await
    }

    /// Transition to `completed`. Terminal.
    pub async fn complete(&self, message: Option<Message>) -> BridgeResult<()> {
        self.update_status(TaskState::Completed, message, true, None)
            .await
    }

    /// Transition to `failed`. Terminal.
    pub async fn failed(&self, message: Option<Message>) -> BridgeResult<()> {
        self.update_status(TaskState::Failed, message, true, None)
            .await
    }

    /// Transition to `canceled`. Terminal.
    pub async fn cancel(&self, message: Option<Message>) -> BridgeResult<()> {
        self.update_status(TaskState::Canceled, message, true, None)
            .await
    }

    /// Transition to `failed` with a single-text agent message.
    pub async fn failed_with_text(&self, text: &str) -> BridgeResult<()> {
        let message = new_agent_text_message(
            text,
            Some(self.context_id.as_str()),
            Some(self.task_id.as_str()),
        );
        self.failed(Some(message)).await
    }

    /// Build an agent message scoped to this task, without publishing it.
    pub fn new_agent_message(
        &self,
        parts: Vec<Part>,
        metadata: Option<serde_json::Value>,
    ) -> Message {
        let mut message = new_agent_parts_message(
            parts,
            Some(self.context_id.as_str()),
            Some(self.task_id.as_str()),
        );
        message.metadata = metadata;
        message
    }

    /// The task ID this updater is tracking.
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// The context ID this updater is tracking.
    pub fn context_id(&self) -> &str {
        &self.context_id
    }
}
