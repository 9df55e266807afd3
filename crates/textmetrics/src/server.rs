//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the metrics engine to AI assistants over stdio. Every tool is a
//! thin wrapper: it checks the input size, calls the core library, and
//! returns the report as pretty JSON.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use textmetrics_core::{analyze, counts, keywords, readability};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze.
    pub text: String,
}

/// Parameters for the `get_keywords` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetKeywordsParams {
    /// The text to analyze.
    pub text: String,
}

/// Parameters for the `check_readability` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckReadabilityParams {
    /// The text to analyze.
    pub text: String,
}

/// MCP server exposing the metrics engine.
#[derive(Clone)]
pub struct TextServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    max_input_bytes: Option<usize>,
}

impl Default for TextServer {
    fn default() -> Self {
        Self::new(Some(textmetrics_core::DEFAULT_MAX_INPUT_BYTES))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl TextServer {
    /// Create a server that rejects text larger than `max_input_bytes`.
    pub fn new(max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            max_input_bytes,
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!(
                    "input too large: {} bytes (limit: {max} bytes)",
                    text.len()
                ),
                None,
            )),
            _ => Ok(()),
        }
    }

    /// Get package information.
    #[tool(description = "Get textmetrics name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Every metric for a piece of text.
    #[tool(
        description = "Analyze text. Returns word, character, sentence, and paragraph counts, reading and speaking time, reading level, word and sentence length, and the top keywords with density."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_text", "executing MCP tool");
        self.check_size(&params.text)?;

        let snapshot = analyze(&params.text);
        let json = to_json(&snapshot)?;

        tracing::info!(
            tool = "analyze_text",
            words = snapshot.word_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Keyword frequency and density.
    #[tool(
        description = "Find the ten most frequent keywords (three or more letters, stop words removed) with their counts and density."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn get_keywords(
        &self,
        Parameters(params): Parameters<GetKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_keywords", "executing MCP tool");
        self.check_size(&params.text)?;

        let report = keywords::analyze_keywords(&params.text);
        let json = to_json(&report)?;

        tracing::info!(
            tool = "get_keywords",
            keywords = report.keywords.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Readability score and reading time.
    #[tool(
        description = "Check readability of text. Returns the Flesch Reading Ease score, reading level, syllables per word, and reading/speaking time in minutes."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_readability(
        &self,
        Parameters(params): Parameters<CheckReadabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "check_readability", "executing MCP tool");
        self.check_size(&params.text)?;

        let basic = counts::count(&params.text);
        let report = readability::estimate(&params.text, basic.words, basic.sentences);
        let json = to_json(&report)?;

        tracing::info!(
            tool = "check_readability",
            level = %report.level,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for TextServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use tools to count words, score readability, and rank keywords.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
