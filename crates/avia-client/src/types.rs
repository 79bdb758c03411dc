//! Wire types for the assistant chat protocol

use serde::{Deserialize, Serialize};

/// Body of a chat request: one user message per call.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Successful reply from the assistant endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    /// The reply text shown to the user.
    pub response: String,
    /// Intermediate agent steps the backend may attach. Opaque: carried
    /// through for operator visibility, nothing depends on their shape.
    #[serde(default)]
    pub steps: Vec<serde_json::Value>,
}

/// Error body the backend returns on non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(ChatRequest {
            message: "flight status of AB123".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"message": "flight status of AB123"}));
    }

    #[test]
    fn test_reply_without_steps() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response": "Flight AB123 is on time"}"#).unwrap();
        assert_eq!(reply.response, "Flight AB123 is on time");
        assert!(reply.steps.is_empty());
    }

    #[test]
    fn test_reply_with_steps() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"response": "ok", "steps": [{"thought": "look up the flight"}, "done"]}"#,
        )
        .unwrap();
        assert_eq!(reply.steps.len(), 2);
    }
}
