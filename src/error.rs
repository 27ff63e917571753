//! Bridge error types.
//!
//! The reconciliation functions in [`crate::reconcile`] never fail: malformed
//! input degrades to a less structured interpretation instead. Errors only
//! come out of the surrounding plumbing (executor, history store, event
//! queue, chat model), and each variant maps onto a JSON-RPC error code so a
//! transport layer can report it unchanged.

// ---------------------------------------------------------------------------
// JSON-RPC error codes used by the surrounding transport
// ---------------------------------------------------------------------------

/// Invalid JSON was received.
pub const PARSE_ERROR: i64 = -32700;

/// Invalid method parameter(s).
pub const INVALID_PARAMS: i64 = -32602;

/// Internal JSON-RPC error.
pub const INTERNAL_ERROR: i64 = -32603;

/// The agent returned an invalid response.
pub const INVALID_AGENT_RESPONSE: i64 = -32006;

// ---------------------------------------------------------------------------
// BridgeError enum
// ---------------------------------------------------------------------------

/// Unified error type for the executor and its collaborators.
///
/// Protocol-facing variants carry a human-readable message and an optional
/// structured `data` payload.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    /// Invalid JSON payload (code -32700).
    #[error("Parse error: {message}")]
    ParseError {
        /// Human-readable error message.
        message: String,
        /// Optional structured error data.
        data: Option<serde_json::Value>,
    },

    /// Invalid parameters, e.g. an execute request without a message (code -32602).
    #[error("Invalid params: {message}")]
    InvalidParams {
        /// Human-readable error message.
        message: String,
        /// Optional structured error data.
        data: Option<serde_json::Value>,
    },

    /// Internal error (code -32603).
    #[error("Internal error: {message}")]
    InternalError {
        /// Human-readable error message.
        message: String,
        /// Optional structured error data.
        data: Option<serde_json::Value>,
    },

    /// The chat model produced no usable response (code -32006).
    #[error("Invalid agent response: {message}")]
    InvalidAgentResponse {
        /// Human-readable error message.
        message: String,
        /// Optional structured error data.
        data: Option<serde_json::Value>,
    },

    // -- Collaborator errors (no dedicated protocol code) --
    /// The chat model call or its stream failed.
    #[error("Chat model error: {0}")]
    Model(String),

    /// The conversation history store failed.
    #[error("History store error: {0}")]
    Store(String),

    /// A task lifecycle transition was rejected (e.g. after a terminal state).
    #[error("Task state error: {0}")]
    TaskState(String),

    /// Catch-all for errors that don't fit other categories.
    #[error("{0}")]
    Other(String),
}

/// Convenience result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

impl BridgeError {
    /// Create a `ParseError` with a message and no data.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            data: None,
        }
    }

    /// Create an `InvalidParams` with a message and no data.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
            data: None,
        }
    }

    /// Create an `InternalError` with a message and no data.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            data: None,
        }
    }

    /// Create an `InvalidAgentResponse` with a message and no data.
    pub fn invalid_agent_response(message: impl Into<String>) -> Self {
        Self::InvalidAgentResponse {
            message: message.into(),
            data: None,
        }
    }

    /// Create a `Model` error.
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model(message.into())
    }

    /// Returns the JSON-RPC error code for this error variant.
    ///
    /// Collaborator errors map to -32603 (internal error).
    pub fn code(&self) -> i64 {
        match self {
            BridgeError::ParseError { .. } => PARSE_ERROR,
            BridgeError::InvalidParams { .. } => INVALID_PARAMS,
            BridgeError::InternalError { .. } => INTERNAL_ERROR,
            BridgeError::InvalidAgentResponse { .. } => INVALID_AGENT_RESPONSE,
            BridgeError::Model(_)
            | BridgeError::Store(_)
            | BridgeError::TaskState(_)
            | BridgeError::Other(_) => INTERNAL_ERROR,
        }
    }

    /// Structured data attached to a protocol-facing variant, if any.
    pub fn data(&self) -> Option<&serde_json::Value> {
        match self {
            BridgeError::ParseError { data, .. }
            | BridgeError::InvalidParams { data, .. }
            | BridgeError::InternalError { data, .. }
            | BridgeError::InvalidAgentResponse { data, .. } => data.as_ref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::ParseError {
            message: err.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_json_rpc() {
        assert_eq!(PARSE_ERROR, -32700);
        assert_eq!(INVALID_PARAMS, -32602);
        assert_eq!(INTERNAL_ERROR, -32603);
        assert_eq!(INVALID_AGENT_RESPONSE, -32006);
    }

    #[test]
    fn collaborator_errors_map_to_internal() {
        assert_eq!(BridgeError::model("boom").code(), INTERNAL_ERROR);
        assert_eq!(BridgeError::Store("down".into()).code(), INTERNAL_ERROR);
        assert_eq!(BridgeError::TaskState("done".into()).code(), INTERNAL_ERROR);
    }

    #[test]
    fn convenience_constructor_sets_data_none() {
        let err = BridgeError::invalid_params("message is required");
        match &err {
            BridgeError::InvalidParams { message, data } => {
                assert_eq!(message, "message is required");
                assert!(data.is_none());
            }
            _ => panic!("wrong variant"),
        }
        assert_eq!(err.code(), INVALID_PARAMS);
        assert!(err.data().is_none());
    }

    #[test]
    fn serde_error_becomes_parse_error() {
        let err: BridgeError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), PARSE_ERROR);
        assert!(err.to_string().starts_with("Parse error"));
    }
}
