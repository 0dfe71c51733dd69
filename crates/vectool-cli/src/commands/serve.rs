//! `vectool serve` command.
//!
//! Starts the MCP server over stdio or the HTTP/JSON server, both backed by
//! the same dispatcher.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use clap::Args;

use vectool_config::VectoolConfig;
use vectool_mcp::McpHandler;
use vectool_transport_http::{cors_layer, HttpServer};
use vectool_transport_stdio::{McpServer, StdioTransport};

use crate::shared;

/// Serve the tool catalog.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Transport mode: stdio (default) or http.
    #[arg(long, default_value = "stdio", value_parser = ["stdio", "http"])]
    pub transport: String,
    /// Bind address for HTTP (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,
    /// TCP port for HTTP (overrides `server.port`).
    #[arg(long)]
    pub port: Option<u16>,
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: &VectoolConfig) -> anyhow::Result<()> {
    let store = shared::connect_store(config).await?;
    let dispatcher = shared::build_dispatcher(Arc::clone(&store), config)?;

    let grace = config.timeouts.shutdown_grace();
    let (shutdown, signalled) = shared::recorded_shutdown_signal();

    match args.transport.as_str() {
        "http" => {
            let addr = bind_address(args, config)?;
            let cors = cors_layer(&config.cors)?;
            let server = HttpServer::new(Arc::clone(&dispatcher), addr, cors);
            server
                .run(shutdown, grace)
                .await
                .map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        _ => {
            let handler = Arc::new(McpHandler::new(Arc::clone(&dispatcher)));
            let mut server = McpServer::new(StdioTransport::stdio(), handler);
            tracing::info!(tools = dispatcher.registry().len(), "vectool MCP server ready on stdio");
            server
                .run_until(shutdown, grace)
                .await
                .map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
    }

    // The transport may already have used part of the grace period.
    shared::drain(&dispatcher, shared::remaining_grace(signalled, grace)).await;
    shared::close_store(store.as_ref()).await;
    Ok(())
}

fn bind_address(args: &ServeArgs, config: &VectoolConfig) -> anyhow::Result<SocketAddr> {
    let host = args.host.as_deref().unwrap_or(&config.server.host);
    let ip: IpAddr = host
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid host '{host}': {e}"))?;
    Ok(SocketAddr::new(ip, args.port.unwrap_or(config.server.port)))
}
