//! Conversation state types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse progress marker for a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing has happened yet
    #[default]
    Idle,
    /// The caller was prompted to state (or confirm) a goal
    DefiningGoal,
    /// A goal is set and the conversation is gathering ideas
    Exploring,
    /// A summary has been produced
    Summarizing,
}

impl Phase {
    /// Wire name of the phase
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::DefiningGoal => "defining_goal",
            Phase::Exploring => "exploring",
            Phase::Summarizing => "summarizing",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything tracked for a single conversation identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub id: String,
    pub goal: Option<String>,
    pub summary: Option<String>,
    /// Append-only, insertion ordered, no duplicates
    pub key_points: Vec<String>,
    pub phase: Phase,
}

impl ConversationState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            goal: None,
            summary: None,
            key_points: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn has_key_point(&self, point: &str) -> bool {
        self.key_points.iter().any(|existing| existing == point)
    }
}
