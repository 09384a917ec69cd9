//! Conversation phase state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod event;
mod outcome;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use event::Event;
pub use outcome::Outcome;
pub use state::{ConversationState, Phase};
pub use transition::{transition, TransitionResult};
