//! Outcomes produced by state transitions

/// What a transition did, rendered into the caller-facing reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    GoalStored { goal: String },
    KeyPointAdded { point: String },
    /// Point was already present; state left untouched
    KeyPointAlreadyRecorded { point: String },
    SummaryStored,
    NextStep { suggestion: String },
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::GoalStored { goal } => format!("Conversation goal set to: {goal}"),
            Outcome::KeyPointAdded { point } => format!("Key point recorded: {point}"),
            Outcome::KeyPointAlreadyRecorded { point } => {
                format!("Key point already recorded: {point}")
            }
            Outcome::SummaryStored => {
                "Conversation summary generated and stored. Read the summary resource to view it."
                    .to_string()
            }
            Outcome::NextStep { suggestion } => suggestion.clone(),
        }
    }

    /// Whether the transition changed any field of the state
    pub fn mutated(&self) -> bool {
        !matches!(self, Outcome::KeyPointAlreadyRecorded { .. })
    }
}
