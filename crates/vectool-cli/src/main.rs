//! vectool CLI: serves the vector-store tool catalog to agents.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

mod commands;
mod input;
mod output;
pub(crate) mod shared;

/// vectool - vector-store tools for AI agents over MCP or HTTP.
#[derive(Debug, Parser)]
#[command(name = "vectool", version, about)]
struct Cli {
    /// Configuration file path (TOML).
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbosity level (-v, -vv). Overrides `logging.level`.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, global = true, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the tool catalog over stdio (MCP) or HTTP.
    Serve(commands::serve::ServeArgs),
    /// Print the tool catalog as JSON.
    Tools(commands::tools::ToolsArgs),
    /// Invoke one tool and print its result.
    Call(commands::call::CallArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = vectool_config::load_config(cli.config.as_deref())?;

    let level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    init_tracing(level, &cli.log_format);

    tracing::debug!(config = ?cli.config, backend = %config.default_backend, "vectool starting");

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Tools(args) => commands::tools::execute(args, &config).await,
        Commands::Call(args) => commands::call::execute(args, &config).await,
    }
}

/// Installs the global subscriber. Output goes to stderr; stdout belongs to
/// the stdio transport and to command results.
fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        "json" => builder
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init(),
        _ => builder.init(),
    }
}
