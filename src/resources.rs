//! Read-only conversation resources
//!
//! Addressed as `conversation://{conversationId}/{aspect}`. Rendering is a
//! pure function of the current state.

use crate::error::{TrackerError, TrackerResult};
use crate::identity::{resolve_identity, ConversationIdArg};
use crate::state_machine::ConversationState;
use crate::store::ConversationStore;
use std::fmt;
use std::str::FromStr;

pub const URI_SCHEME: &str = "conversation://";

pub const GOAL_NOT_SET: &str = "Goal not set yet.";
pub const SUMMARY_NOT_AVAILABLE: &str = "No summary available yet.";
pub const NO_KEY_POINTS: &str = "No key points recorded yet.";

/// A readable facet of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    Goal,
    Summary,
    State,
    KeyPoints,
}

impl Aspect {
    pub const ALL: [Aspect; 4] = [Aspect::Goal, Aspect::Summary, Aspect::State, Aspect::KeyPoints];

    pub fn as_str(self) -> &'static str {
        match self {
            Aspect::Goal => "goal",
            Aspect::Summary => "summary",
            Aspect::State => "state",
            Aspect::KeyPoints => "keyPoints",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Aspect::Goal => "The current goal of the conversation",
            Aspect::Summary => "The latest stored summary of the conversation",
            Aspect::State => "The current phase of the conversation",
            Aspect::KeyPoints => "Key points recorded so far, one per line",
        }
    }

    pub fn render(self, state: &ConversationState) -> String {
        match self {
            Aspect::Goal => state
                .goal
                .clone()
                .unwrap_or_else(|| GOAL_NOT_SET.to_string()),
            Aspect::Summary => state
                .summary
                .clone()
                .unwrap_or_else(|| SUMMARY_NOT_AVAILABLE.to_string()),
            Aspect::State => format!("Current conversation phase: {}", state.phase),
            Aspect::KeyPoints if state.key_points.is_empty() => NO_KEY_POINTS.to_string(),
            Aspect::KeyPoints => state
                .key_points
                .iter()
                .map(|point| format!("- {point}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aspect {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|aspect| aspect.as_str() == s)
            .ok_or_else(|| TrackerError::invalid_params(format!("Unknown resource aspect: {s}")))
    }
}

/// A parsed `conversation://{id}/{aspect}` address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUri {
    /// Raw id segment; empty when the caller left it out
    pub conversation_id: String,
    pub aspect: Aspect,
}

impl ResourceUri {
    pub fn new(conversation_id: impl Into<String>, aspect: Aspect) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            aspect,
        }
    }

    pub fn parse(uri: &str) -> TrackerResult<Self> {
        let path = uri
            .strip_prefix(URI_SCHEME)
            .ok_or_else(|| TrackerError::invalid_params(format!("Unsupported resource URI: {uri}")))?;
        let (conversation_id, aspect) = path
            .rsplit_once('/')
            .ok_or_else(|| TrackerError::invalid_params(format!("Malformed resource URI: {uri}")))?;
        if conversation_id.contains('/') {
            return Err(TrackerError::invalid_params(format!(
                "Malformed resource URI: {uri}"
            )));
        }
        Ok(Self::new(conversation_id, aspect.parse()?))
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{URI_SCHEME}{}/{}", self.conversation_id, self.aspect)
    }
}

/// URI template and metadata for one aspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDef {
    pub uri_template: String,
    pub name: String,
    pub description: &'static str,
}

/// Concrete resource for a tracked conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDef {
    pub uri: String,
    pub name: String,
    pub description: &'static str,
}

/// Renders resources from a shared store
#[derive(Clone)]
pub struct ResourceReader {
    store: ConversationStore,
}

impl ResourceReader {
    pub fn new(store: ConversationStore) -> Self {
        Self { store }
    }

    /// Read one resource as plain text
    ///
    /// The URI is validated first, so a bad aspect never creates state. A
    /// valid read of an unseen identity creates it and renders the unset
    /// sentinels.
    pub fn read(&self, uri: &str, session: Option<&str>) -> TrackerResult<String> {
        let parsed = ResourceUri::parse(uri)?;
        let explicit = ConversationIdArg::from(parsed.conversation_id.as_str());
        let conversation_id = resolve_identity(Some(&explicit), session);
        let state = self.store.get(&conversation_id);

        tracing::debug!(
            conversation_id = %conversation_id,
            aspect = %parsed.aspect,
            "Resource read"
        );

        Ok(parsed.aspect.render(&state))
    }

    pub fn templates() -> Vec<TemplateDef> {
        Aspect::ALL
            .into_iter()
            .map(|aspect| TemplateDef {
                uri_template: format!("{URI_SCHEME}{{conversationId}}/{aspect}"),
                name: format!("conversation-{aspect}"),
                description: aspect.description(),
            })
            .collect()
    }

    /// Every aspect of every tracked conversation
    pub fn resources(&self) -> Vec<ResourceDef> {
        self.store
            .ids()
            .into_iter()
            .flat_map(|id| {
                Aspect::ALL.into_iter().map(move |aspect| ResourceDef {
                    uri: ResourceUri::new(id.clone(), aspect).to_string(),
                    name: format!("{id} {aspect}"),
                    description: aspect.description(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::Phase;

    fn reader() -> (ResourceReader, ConversationStore) {
        let store = ConversationStore::new();
        (ResourceReader::new(store.clone()), store)
    }

    #[test]
    fn test_parse_uri() {
        assert_eq!(
            ResourceUri::parse("conversation://conv1/keyPoints").unwrap(),
            ResourceUri::new("conv1", Aspect::KeyPoints)
        );
        assert_eq!(
            ResourceUri::parse("conversation:///goal").unwrap(),
            ResourceUri::new("", Aspect::Goal)
        );
        for bad in [
            "conversation://conv1/mood",
            "conversation://conv1",
            "conversation://a/b/goal",
            "file:///etc/passwd",
        ] {
            assert!(matches!(
                ResourceUri::parse(bad),
                Err(TrackerError::InvalidParams(_))
            ));
        }
    }

    #[test]
    fn test_uri_display_round_trips() {
        let uri = ResourceUri::new("conv1", Aspect::State);
        assert_eq!(uri.to_string(), "conversation://conv1/state");
        assert_eq!(ResourceUri::parse(&uri.to_string()).unwrap(), uri);
    }

    #[test]
    fn test_unseen_identity_reads_sentinels_and_creates_once() {
        let (reader, store) = reader();

        assert_eq!(reader.read("conversation://fresh/goal", None).unwrap(), GOAL_NOT_SET);
        assert_eq!(
            reader.read("conversation://fresh/summary", None).unwrap(),
            SUMMARY_NOT_AVAILABLE
        );
        assert_eq!(
            reader.read("conversation://fresh/state", None).unwrap(),
            "Current conversation phase: idle"
        );
        assert_eq!(
            reader.read("conversation://fresh/keyPoints", None).unwrap(),
            NO_KEY_POINTS
        );

        assert_eq!(store.ids(), vec!["fresh"]);
        assert_eq!(store.get("fresh").phase, Phase::Idle);
    }

    #[test]
    fn test_unknown_aspect_creates_nothing() {
        let (reader, store) = reader();
        let result = reader.read("conversation://conv1/mood", None);
        assert!(matches!(result, Err(TrackerError::InvalidParams(_))));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_renders_recorded_values() {
        let (reader, store) = reader();
        store.update("conv1", |state| {
            state.goal = Some("Plan a trip".to_string());
            state.summary = Some("Summary: trip notes".to_string());
            state.key_points = vec!["Visit Paris".to_string(), "Book hotel".to_string()];
            state.phase = Phase::Exploring;
        });

        assert_eq!(reader.read("conversation://conv1/goal", None).unwrap(), "Plan a trip");
        assert_eq!(
            reader.read("conversation://conv1/summary", None).unwrap(),
            "Summary: trip notes"
        );
        assert!(reader
            .read("conversation://conv1/state", None)
            .unwrap()
            .contains("exploring"));
        assert_eq!(
            reader.read("conversation://conv1/keyPoints", None).unwrap(),
            "- Visit Paris\n- Book hotel"
        );
    }

    #[test]
    fn test_empty_id_segment_uses_session() {
        let (reader, store) = reader();
        reader.read("conversation:///goal", Some("session-1")).unwrap();
        reader.read("conversation:///goal", None).unwrap();
        assert_eq!(store.ids(), vec!["default", "session-1"]);
    }

    #[test]
    fn test_listings() {
        let (reader, store) = reader();
        let templates = ResourceReader::templates();
        assert_eq!(templates.len(), 4);
        assert_eq!(templates[3].uri_template, "conversation://{conversationId}/keyPoints");

        assert!(reader.resources().is_empty());
        store.get("conv1");
        let resources = reader.resources();
        assert_eq!(resources.len(), 4);
        assert_eq!(resources[0].uri, "conversation://conv1/goal");
    }
}
