//! Conversation identity resolution
//!
//! Every operation and resource read resolves its identity independently:
//! explicit id, then the transport session id, then `"default"`.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

/// Identity used when neither the caller nor the transport supplies one
pub const DEFAULT_CONVERSATION_ID: &str = "default";

/// Explicit conversation id as it arrives from the caller
///
/// Some clients expand URI template variables into arrays. The `Many` form
/// is a compatibility shim: its first non-empty element is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ConversationIdArg {
    Single(String),
    Many(Vec<String>),
}

impl ConversationIdArg {
    fn candidate(&self) -> Option<&str> {
        match self {
            ConversationIdArg::Single(id) => Some(id.as_str()),
            ConversationIdArg::Many(ids) => {
                tracing::debug!(count = ids.len(), "Conversation id arrived as a sequence");
                ids.iter().map(String::as_str).find(|id| !id.is_empty())
            }
        }
    }
}

impl From<&str> for ConversationIdArg {
    fn from(id: &str) -> Self {
        ConversationIdArg::Single(id.to_string())
    }
}

/// Resolve the identity for one request. Never fails, never returns empty.
pub fn resolve_identity(explicit: Option<&ConversationIdArg>, session: Option<&str>) -> String {
    explicit
        .and_then(ConversationIdArg::candidate)
        .filter(|id| !id.is_empty())
        .or_else(|| session.filter(|id| !id.is_empty()))
        .unwrap_or(DEFAULT_CONVERSATION_ID)
        .to_string()
}
