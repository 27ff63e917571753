//! Task execution surface — runs chat turns as A2A tasks.
//!
//! - [`AgentExecutor`] trait — agent logic invoked per request
//! - [`RequestContext`] — task and context ids plus the inbound message
//! - [`ChatAgentExecutor`] — the chat-model backed executor
//! - [`TaskUpdater`] — task state transitions with a terminal-state guard
//! - [`EventQueue`] — broadcast channel for status events
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use a2a_langchain_bridge::builders::ChatAgentExecutorBuilder;
//! use a2a_langchain_bridge::server::*;
//!
//! let executor = ChatAgentExecutorBuilder::new(Arc::new(MyModel))
//!     .with_system_prompt("You are a helpful assistant.")
//!     .with_history_length(20)
//!     .build();
//!
//! let queue = EventQueue::with_default_capacity();
//! let mut events = queue.subscribe();
//! executor.execute(RequestContext::for_message(inbound), queue).await?;
//! ```

pub mod agent_executor;
pub mod chat_executor;
pub mod event_queue;
pub mod task_updater;

pub use agent_executor::{AgentExecutor, RequestContext};
pub use chat_executor::ChatAgentExecutor;
pub use event_queue::EventQueue;
pub use task_updater::TaskUpdater;
