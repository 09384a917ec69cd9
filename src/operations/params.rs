//! Typed inputs for each operation
//!
//! Schemas are advertised to callers; the same minimum lengths are checked
//! again here so an out-of-contract payload is rejected before any state
//! is touched.

use crate::error::{TrackerError, TrackerResult};
use crate::identity::ConversationIdArg;
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MIN_GOAL_CHARS: usize = 5;
pub const MIN_KEY_POINT_CHARS: usize = 5;
pub const MIN_SUMMARY_SOURCE_CHARS: usize = 10;

/// Parameters for `set_conversation_goal`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetGoalParams {
    /// What the conversation is trying to achieve
    #[schemars(length(min = 5))]
    pub goal_description: String,
    /// Conversation to update (defaults to the session, then "default")
    #[serde(default)]
    pub conversation_id: Option<ConversationIdArg>,
}

/// Parameters for `record_key_point`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordKeyPointParams {
    /// The point to remember; exact duplicates are ignored
    #[schemars(length(min = 5))]
    pub key_point: String,
    #[serde(default)]
    pub conversation_id: Option<ConversationIdArg>,
}

/// Parameters for `summarize_conversation`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeParams {
    /// Source text to condense into the stored summary
    #[schemars(length(min = 10))]
    pub text_to_summarize: String,
    #[serde(default)]
    pub conversation_id: Option<ConversationIdArg>,
}

/// Parameters for `suggest_next_step`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestNextStepParams {
    #[serde(default)]
    pub conversation_id: Option<ConversationIdArg>,
}

/// Deserialize tool arguments into `T`
pub fn parse_arguments<T: DeserializeOwned>(arguments: Map<String, Value>) -> TrackerResult<T> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| TrackerError::invalid_params(e.to_string()))
}

/// Reject `value` if it has fewer than `min` characters
pub fn require_min_chars(field: &str, value: &str, min: usize) -> TrackerResult<()> {
    let count = value.chars().count();
    if count < min {
        return Err(TrackerError::invalid_params(format!(
            "{field} must be at least {min} characters (got {count})"
        )));
    }
    Ok(())
}
