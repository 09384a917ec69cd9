//! Events that can occur in a conversation

/// Events that trigger state transitions, one per operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    GoalSet {
        description: String,
    },
    KeyPointRecorded {
        point: String,
    },
    /// Carries the already-produced summary text; summarization runs
    /// before the transition so the transition stays pure.
    Summarized {
        summary: String,
    },
    NextStepRequested,
}
