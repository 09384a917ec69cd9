//! Pure state transition function
//!
//! The machine is advisory: every event is accepted in every phase. Phase
//! only steers what `suggest_next_step` recommends.

use super::{ConversationState, Event, Outcome, Phase};

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConversationState,
    pub outcome: Outcome,
}

impl TransitionResult {
    pub fn new(state: ConversationState, outcome: Outcome) -> Self {
        Self {
            new_state: state,
            outcome,
        }
    }
}

/// Pure transition function
///
/// Given the same state and event it always produces the same result, with
/// no I/O side effects. Total over all (phase, event) pairs.
pub fn transition(state: &ConversationState, event: Event) -> TransitionResult {
    match event {
        // Any phase + GoalSet -> Exploring (goal overwritten)
        Event::GoalSet { description } => {
            let new_state = ConversationState {
                goal: Some(description.clone()),
                phase: Phase::Exploring,
                ..state.clone()
            };
            TransitionResult::new(new_state, Outcome::GoalStored { goal: description })
        }

        // Any phase + KeyPointRecorded -> same phase
        Event::KeyPointRecorded { point } => {
            if state.has_key_point(&point) {
                return TransitionResult::new(
                    state.clone(),
                    Outcome::KeyPointAlreadyRecorded { point },
                );
            }
            let mut new_state = state.clone();
            new_state.key_points.push(point.clone());
            TransitionResult::new(new_state, Outcome::KeyPointAdded { point })
        }

        // Any phase + Summarized -> Summarizing (summary overwritten)
        Event::Summarized { summary } => {
            let new_state = ConversationState {
                summary: Some(summary),
                phase: Phase::Summarizing,
                ..state.clone()
            };
            TransitionResult::new(new_state, Outcome::SummaryStored)
        }

        Event::NextStepRequested => suggest_next_step(state),
    }
}

fn suggest_next_step(state: &ConversationState) -> TransitionResult {
    let Some(goal) = state.goal.as_deref() else {
        let new_state = ConversationState {
            phase: Phase::DefiningGoal,
            ..state.clone()
        };
        return TransitionResult::new(
            new_state,
            Outcome::NextStep {
                suggestion: "No goal has been set for this conversation yet. \
                             Start by defining what you want to achieve with set_conversation_goal."
                    .to_string(),
            },
        );
    };

    let (phase, suggestion) = match state.phase {
        // Goal present but phase fell back to idle: re-confirm the goal
        Phase::Idle => (
            Phase::DefiningGoal,
            format!(
                "Let's confirm the goal \"{goal}\" and outline the first steps toward it."
            ),
        ),
        Phase::DefiningGoal => (
            Phase::DefiningGoal,
            format!(
                "The goal is \"{goal}\". Refine it if needed, then start exploring ideas and record key points."
            ),
        ),
        Phase::Exploring => (
            Phase::Exploring,
            format!(
                "Keep exploring toward \"{goal}\". Record key points as they come up, or summarize the conversation when you have enough material."
            ),
        ),
        Phase::Summarizing => (
            Phase::Summarizing,
            format!(
                "A summary exists for \"{goal}\". Review it and decide whether the goal is met or what to explore next."
            ),
        ),
    };

    let new_state = ConversationState {
        phase,
        ..state.clone()
    };
    TransitionResult::new(new_state, Outcome::NextStep { suggestion })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_in(phase: Phase, goal: Option<&str>) -> ConversationState {
        ConversationState {
            goal: goal.map(str::to_string),
            phase,
            ..ConversationState::new("test-conv")
        }
    }

    #[test]
    fn test_set_goal_moves_to_exploring() {
        let result = transition(
            &state_in(Phase::Summarizing, Some("old goal")),
            Event::GoalSet {
                description: "Plan a trip".to_string(),
            },
        );

        assert_eq!(result.new_state.phase, Phase::Exploring);
        assert_eq!(result.new_state.goal.as_deref(), Some("Plan a trip"));
        assert_eq!(
            result.outcome,
            Outcome::GoalStored {
                goal: "Plan a trip".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_key_point_leaves_state_untouched() {
        let mut state = state_in(Phase::Exploring, Some("Plan a trip"));
        state.key_points.push("Visit Paris".to_string());

        let result = transition(
            &state,
            Event::KeyPointRecorded {
                point: "Visit Paris".to_string(),
            },
        );

        assert_eq!(result.new_state, state);
        assert!(matches!(
            result.outcome,
            Outcome::KeyPointAlreadyRecorded { .. }
        ));
    }

    #[test]
    fn test_key_points_keep_insertion_order() {
        let state = state_in(Phase::Idle, None);
        let first = transition(
            &state,
            Event::KeyPointRecorded {
                point: "Book hotel".to_string(),
            },
        );
        let second = transition(
            &first.new_state,
            Event::KeyPointRecorded {
                point: "Visit Paris".to_string(),
            },
        );

        assert_eq!(second.new_state.key_points, vec!["Book hotel", "Visit Paris"]);
        assert_eq!(second.new_state.phase, Phase::Idle);
    }

    #[test]
    fn test_summarize_overwrites_and_moves_to_summarizing() {
        let mut state = state_in(Phase::Exploring, Some("Plan a trip"));
        state.summary = Some("Summary: old".to_string());

        let result = transition(
            &state,
            Event::Summarized {
                summary: "Summary: new".to_string(),
            },
        );

        assert_eq!(result.new_state.summary.as_deref(), Some("Summary: new"));
        assert_eq!(result.new_state.phase, Phase::Summarizing);
        assert_eq!(result.outcome, Outcome::SummaryStored);
    }

    #[test]
    fn test_suggest_without_goal_prompts_for_goal() {
        for phase in [
            Phase::Idle,
            Phase::DefiningGoal,
            Phase::Exploring,
            Phase::Summarizing,
        ] {
            let result = transition(&state_in(phase, None), Event::NextStepRequested);
            assert_eq!(result.new_state.phase, Phase::DefiningGoal);
            assert!(result.outcome.message().contains("set_conversation_goal"));
        }
    }

    #[test]
    fn test_suggest_with_goal_table() {
        let cases = [
            (Phase::Idle, Phase::DefiningGoal),
            (Phase::DefiningGoal, Phase::DefiningGoal),
            (Phase::Exploring, Phase::Exploring),
            (Phase::Summarizing, Phase::Summarizing),
        ];
        for (from, expected) in cases {
            let result = transition(
                &state_in(from, Some("Plan a trip")),
                Event::NextStepRequested,
            );
            assert_eq!(result.new_state.phase, expected, "from {from}");
            assert!(result.outcome.message().contains("Plan a trip"));
        }
    }
}
