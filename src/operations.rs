//! Operation dispatch
//!
//! Maps operation names to typed handlers. Each call resolves its identity,
//! then applies exactly one state machine transition under the store lock.

mod params;

pub use params::{
    RecordKeyPointParams, SetGoalParams, SuggestNextStepParams, SummarizeParams,
};

use crate::error::{TrackerError, TrackerResult};
use crate::identity::{resolve_identity, ConversationIdArg};
use crate::state_machine::{transition, Event};
use crate::store::ConversationStore;
use crate::summarizer::Summarizer;
use params::{
    parse_arguments, require_min_chars, MIN_GOAL_CHARS, MIN_KEY_POINT_CHARS,
    MIN_SUMMARY_SOURCE_CHARS,
};
use rmcp::handler::server::tool::schema_for_type;
use rmcp::model::JsonObject;
use serde_json::{Map, Value};
use std::sync::Arc;

/// The closed set of operations callers can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SetConversationGoal,
    RecordKeyPoint,
    SummarizeConversation,
    SuggestNextStep,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::SetConversationGoal,
        Operation::RecordKeyPoint,
        Operation::SummarizeConversation,
        Operation::SuggestNextStep,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::SetConversationGoal => "set_conversation_goal",
            Operation::RecordKeyPoint => "record_key_point",
            Operation::SummarizeConversation => "summarize_conversation",
            Operation::SuggestNextStep => "suggest_next_step",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::SetConversationGoal => {
                "Set or replace the goal of the conversation. Moves the conversation into the exploring phase."
            }
            Operation::RecordKeyPoint => {
                "Record an important point raised in the conversation. Exact duplicates are acknowledged but not stored twice."
            }
            Operation::SummarizeConversation => {
                "Summarize the given text and store it as the conversation summary. Moves the conversation into the summarizing phase."
            }
            Operation::SuggestNextStep => {
                "Suggest what to do next based on the conversation's goal and current phase."
            }
        }
    }

    /// JSON schema for the operation's arguments
    pub fn input_schema(self) -> Arc<JsonObject> {
        match self {
            Operation::SetConversationGoal => schema_for_type::<SetGoalParams>(),
            Operation::RecordKeyPoint => schema_for_type::<RecordKeyPointParams>(),
            Operation::SummarizeConversation => schema_for_type::<SummarizeParams>(),
            Operation::SuggestNextStep => schema_for_type::<SuggestNextStepParams>(),
        }
    }

    /// Parse and validate arguments without touching any state
    fn parse(self, arguments: Map<String, Value>) -> TrackerResult<OperationRequest> {
        let request = match self {
            Operation::SetConversationGoal => {
                let params: SetGoalParams = parse_arguments(arguments)?;
                require_min_chars("goalDescription", &params.goal_description, MIN_GOAL_CHARS)?;
                OperationRequest {
                    conversation_id: params.conversation_id,
                    input: OperationInput::SetGoal {
                        description: params.goal_description,
                    },
                }
            }
            Operation::RecordKeyPoint => {
                let params: RecordKeyPointParams = parse_arguments(arguments)?;
                require_min_chars("keyPoint", &params.key_point, MIN_KEY_POINT_CHARS)?;
                OperationRequest {
                    conversation_id: params.conversation_id,
                    input: OperationInput::RecordKeyPoint {
                        point: params.key_point,
                    },
                }
            }
            Operation::SummarizeConversation => {
                let params: SummarizeParams = parse_arguments(arguments)?;
                require_min_chars(
                    "textToSummarize",
                    &params.text_to_summarize,
                    MIN_SUMMARY_SOURCE_CHARS,
                )?;
                OperationRequest {
                    conversation_id: params.conversation_id,
                    input: OperationInput::Summarize {
                        text: params.text_to_summarize,
                    },
                }
            }
            Operation::SuggestNextStep => {
                let params: SuggestNextStepParams = parse_arguments(arguments)?;
                OperationRequest {
                    conversation_id: params.conversation_id,
                    input: OperationInput::SuggestNextStep,
                }
            }
        };
        Ok(request)
    }
}

/// A validated request, ready to run
#[derive(Debug)]
struct OperationRequest {
    conversation_id: Option<ConversationIdArg>,
    input: OperationInput,
}

#[derive(Debug)]
enum OperationInput {
    SetGoal { description: String },
    RecordKeyPoint { point: String },
    Summarize { text: String },
    SuggestNextStep,
}

/// Runs operations against a shared store
#[derive(Clone)]
pub struct Dispatcher {
    store: ConversationStore,
    summarizer: Arc<dyn Summarizer>,
}

impl Dispatcher {
    pub fn new(store: ConversationStore, summarizer: Arc<dyn Summarizer>) -> Self {
        Self { store, summarizer }
    }

    /// Run the named operation and return the reply text
    ///
    /// Unknown names and malformed arguments are rejected with
    /// `InvalidParams` before identity resolution or any store access.
    pub fn dispatch(
        &self,
        name: &str,
        arguments: Map<String, Value>,
        session: Option<&str>,
    ) -> TrackerResult<String> {
        let operation = Operation::from_name(name)
            .ok_or_else(|| TrackerError::invalid_params(format!("Unknown tool: {name}")))?;
        let request = operation.parse(arguments)?;
        let conversation_id = resolve_identity(request.conversation_id.as_ref(), session);

        let event = match request.input {
            OperationInput::SetGoal { description } => Event::GoalSet { description },
            OperationInput::RecordKeyPoint { point } => Event::KeyPointRecorded { point },
            OperationInput::Summarize { text } => Event::Summarized {
                summary: self.summarizer.summarize(&text),
            },
            OperationInput::SuggestNextStep => Event::NextStepRequested,
        };

        let (outcome, phase) = self.store.update(&conversation_id, |state| {
            let result = transition(state, event);
            *state = result.new_state;
            (result.outcome, state.phase)
        });

        tracing::info!(
            conversation_id = %conversation_id,
            operation = operation.name(),
            phase = %phase,
            mutated = outcome.mutated(),
            "Operation applied"
        );

        Ok(outcome.message())
    }
}
