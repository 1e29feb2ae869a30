//! Interaction requests — what the host hands the pipeline per event.
//!
//! The request is consumed read-only: the type tag participates in the
//! retrieval cache key and the raw content is echoed into the final prompt.
//! Content is deliberately unvalidated; any text a channel produces is
//! accepted as-is.

use serde::{Deserialize, Serialize};

/// A single interaction event from the host (chat message, click, timer…).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRequest {
    /// Event-type tag, e.g. `"conversation"`, `"poke"`, `"idle_checkin"`.
    pub interaction_type: String,

    /// Free-text payload, if the event carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl InteractionRequest {
    /// A conversation turn carrying user text.
    pub fn conversation(content: impl Into<String>) -> Self {
        Self {
            interaction_type: "conversation".into(),
            content: Some(content.into()),
        }
    }

    /// A content-free event such as a poke or a scheduled check-in.
    pub fn event(interaction_type: impl Into<String>) -> Self {
        Self {
            interaction_type: interaction_type.into(),
            content: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_carries_content() {
        let req = InteractionRequest::conversation("hello there");
        assert_eq!(req.interaction_type, "conversation");
        assert_eq!(req.content.as_deref(), Some("hello there"));
    }

    #[test]
    fn event_has_no_content() {
        let req = InteractionRequest::event("poke");
        assert!(req.content.is_none());
    }

    #[test]
    fn serialization_skips_empty_content() {
        let json = serde_json::to_string(&InteractionRequest::event("poke")).unwrap();
        assert!(!json.contains("content"));
    }
}
