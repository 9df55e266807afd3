//! Serve command — MCP server over stdio.

use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use crate::server::TextServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Run the MCP server on stdin/stdout until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, max_input_bytes: Option<usize>) -> anyhow::Result<()> {
    info!(max_input_bytes = ?max_input_bytes, "starting MCP server on stdio");

    let service = TextServer::new(max_input_bytes)
        .serve(rmcp::transport::stdio())
        .await?;
    service.waiting().await?;

    info!("MCP server stopped");
    Ok(())
}
