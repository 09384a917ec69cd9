//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_phase() -> impl Strategy<Value = Phase> {
    prop_oneof![
        Just(Phase::Idle),
        Just(Phase::DefiningGoal),
        Just(Phase::Exploring),
        Just(Phase::Summarizing),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z ]{5,40}"
}

fn arb_state() -> impl Strategy<Value = ConversationState> {
    (
        "[a-z0-9]{1,12}",
        proptest::option::of(arb_text()),
        proptest::option::of(arb_text()),
        proptest::collection::hash_set(arb_text(), 0..5),
        arb_phase(),
    )
        .prop_map(|(id, goal, summary, points, phase)| ConversationState {
            id,
            goal,
            summary,
            key_points: points.into_iter().collect(),
            phase,
        })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_text().prop_map(|description| Event::GoalSet { description }),
        arb_text().prop_map(|point| Event::KeyPointRecorded { point }),
        arb_text().prop_map(|summary| Event::Summarized { summary }),
        Just(Event::NextStepRequested),
    ]
}

fn has_duplicates(points: &[String]) -> bool {
    let mut seen = std::collections::HashSet::new();
    points.iter().any(|p| !seen.insert(p))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_set_goal_always_exploring(state in arb_state(), description in arb_text()) {
        let result = transition(&state, Event::GoalSet { description: description.clone() });
        prop_assert_eq!(result.new_state.phase, Phase::Exploring);
        prop_assert_eq!(result.new_state.goal, Some(description));
    }

    #[test]
    fn prop_summarize_always_summarizing(state in arb_state(), summary in arb_text()) {
        let result = transition(&state, Event::Summarized { summary });
        prop_assert_eq!(result.new_state.phase, Phase::Summarizing);
    }

    #[test]
    fn prop_key_point_never_changes_phase(state in arb_state(), point in arb_text()) {
        let result = transition(&state, Event::KeyPointRecorded { point });
        prop_assert_eq!(result.new_state.phase, state.phase);
    }

    #[test]
    fn prop_suggest_without_goal_defines_goal(mut state in arb_state()) {
        state.goal = None;
        let result = transition(&state, Event::NextStepRequested);
        prop_assert_eq!(result.new_state.phase, Phase::DefiningGoal);
    }

    #[test]
    fn prop_suggest_references_goal(mut state in arb_state(), goal in arb_text()) {
        state.goal = Some(goal.clone());
        let result = transition(&state, Event::NextStepRequested);
        prop_assert!(result.outcome.message().contains(&goal));
        prop_assert_ne!(result.new_state.phase, Phase::Idle);
    }

    #[test]
    fn prop_key_points_stay_distinct(
        state in arb_state(),
        events in proptest::collection::vec(arb_event(), 0..20),
    ) {
        let mut current = state;
        for event in events {
            let before = current.key_points.clone();
            current = transition(&current, event).new_state;
            prop_assert!(!has_duplicates(&current.key_points));
            // Append-only
            prop_assert!(current.key_points.starts_with(&before));
        }
    }

    #[test]
    fn prop_identity_never_changes(state in arb_state(), event in arb_event()) {
        let result = transition(&state, event);
        prop_assert_eq!(result.new_state.id, state.id);
    }

    #[test]
    fn prop_transition_is_deterministic(state in arb_state(), event in arb_event()) {
        let a = transition(&state, event.clone());
        let b = transition(&state, event);
        prop_assert_eq!(a.new_state, b.new_state);
        prop_assert_eq!(a.outcome, b.outcome);
    }
}
