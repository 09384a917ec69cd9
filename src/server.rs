//! Protocol surface for the conversation tracker
//!
//! Exposes operations as tools and conversation aspects as resources.
//! Transport glue lives in `http`; stdio is served directly from here.

mod http;

pub use http::serve_http;

use crate::error::TrackerError;
use crate::operations::{Dispatcher, Operation};
use crate::resources::ResourceReader;
use crate::store::ConversationStore;
use crate::summarizer::Summarizer;
use rmcp::{
    model::{
        AnnotateAble, CallToolRequestParams, CallToolResult, Content, Implementation,
        ListResourceTemplatesResult, ListResourcesResult, ListToolsResult,
        PaginatedRequestParams, RawResource, ReadResourceRequestParams, ReadResourceResult,
        ResourceContents, ResourceTemplate, ServerCapabilities, ServerInfo, Tool,
    },
    service::{RequestContext, RoleServer},
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde_json::json;
use std::sync::Arc;
use tokio::io::{stdin, stdout};

/// Header the streamable HTTP transport uses to carry the session id
const SESSION_HEADER: &str = "mcp-session-id";

const TEXT_MIME: &str = "text/plain";

/// Conversation tracking server
///
/// Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct ConversationServer {
    dispatcher: Dispatcher,
    reader: ResourceReader,
}

impl ConversationServer {
    pub fn new(store: ConversationStore, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            dispatcher: Dispatcher::new(store.clone(), summarizer),
            reader: ResourceReader::new(store),
        }
    }

    /// Run the server over stdin/stdout until the client disconnects
    pub async fn run_stdio(self) -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!("Starting conversation tracker on stdio");
        let server = self.serve((stdin(), stdout())).await?;
        tracing::info!("Client initialized, waiting for requests");
        let reason = server.waiting().await?;
        tracing::info!(reason = ?reason, "Stdio session ended");
        Ok(())
    }
}

/// Session id attached by the HTTP transport, if any
fn session_id(context: &RequestContext<RoleServer>) -> Option<String> {
    context
        .extensions
        .get::<axum::http::request::Parts>()
        .and_then(|parts| parts.headers.get(SESSION_HEADER))
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

impl From<TrackerError> for McpError {
    fn from(error: TrackerError) -> Self {
        match error {
            TrackerError::InvalidParams(message) => McpError::invalid_params(message, None),
        }
    }
}

fn resource_template(
    uri_template: &str,
    name: &str,
    description: &str,
) -> Result<ResourceTemplate, McpError> {
    serde_json::from_value(json!({
        "uriTemplate": uri_template,
        "name": name,
        "description": description,
        "mimeType": TEXT_MIME,
    }))
    .map_err(|e| McpError::internal_error(format!("Invalid resource template: {e}"), None))
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

impl ServerHandler for ConversationServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "conversation-tracker".to_string(),
                title: Some("Conversation Tracker".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tracks the goal, key points, summary and phase of a conversation. \
                Use set_conversation_goal first, record_key_point as ideas come up, \
                summarize_conversation to store a summary and suggest_next_step for guidance. \
                Read conversation://{conversationId}/{goal|summary|state|keyPoints} for the current values."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = Operation::ALL
            .into_iter()
            .map(|op| Tool::new(op.name(), op.description(), op.input_schema()))
            .collect();

        Ok(ListToolsResult {
            meta: None,
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let session = session_id(&context);
        let text = self
            .dispatcher
            .dispatch(
                request.name.as_ref(),
                request.arguments.unwrap_or_default(),
                session.as_deref(),
            )
            .map_err(|error| {
                tracing::warn!(tool = %request.name, error = %error, "Tool call rejected");
                McpError::from(error)
            })?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self
            .reader
            .resources()
            .into_iter()
            .map(|def| {
                let mut raw = RawResource::new(def.uri, def.name);
                raw.description = Some(def.description.to_string());
                raw.mime_type = Some(TEXT_MIME.to_string());
                raw.no_annotation()
            })
            .collect();

        Ok(ListResourcesResult {
            meta: None,
            resources,
            next_cursor: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let resource_templates = ResourceReader::templates()
            .iter()
            .map(|def| resource_template(&def.uri_template, &def.name, def.description))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ListResourceTemplatesResult {
            meta: None,
            resource_templates,
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let session = session_id(&context);
        let text = self
            .reader
            .read(&request.uri, session.as_deref())
            .map_err(|error| {
                tracing::warn!(uri = %request.uri, error = %error, "Resource read rejected");
                McpError::from(error)
            })?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri)],
        })
    }
}
