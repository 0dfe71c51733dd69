//! `vectool call` command.
//!
//! Runs a single invocation through the dispatcher, so argument validation,
//! timeouts and panic isolation behave exactly as they do when serving.

use clap::Args;

use vectool_config::VectoolConfig;

use crate::{input, output, shared};

/// Invoke one tool.
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Tool name, e.g. `create_collection`.
    pub name: String,
    /// Arguments as a JSON object.
    #[arg(short, long, default_value = "{}")]
    pub args: String,
    /// Read the arguments from a file (use "-" for stdin).
    #[arg(short = 'f', long)]
    pub args_file: Option<String>,
}

/// Executes the call command.
pub async fn execute(args: &CallArgs, config: &VectoolConfig) -> anyhow::Result<()> {
    let arguments = input::resolve_args(&args.args, args.args_file.as_deref())?;
    let store = shared::connect_store(config).await?;
    let dispatcher = shared::build_dispatcher(store, config)?;

    tracing::debug!(tool = %args.name, "invoking tool");
    match dispatcher.invoke(&args.name, arguments).await {
        Ok(result) => output::print_json(&result),
        Err(e) => {
            output::print_error(&format!("{}: {}", e.kind, e.message));
            anyhow::bail!("tool '{}' failed", args.name)
        }
    }
}
