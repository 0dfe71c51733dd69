//! `vectool tools` command.

use clap::Args;
use serde_json::json;

use vectool_config::VectoolConfig;

use crate::{output, shared};

/// Print the tool catalog.
#[derive(Debug, Args)]
pub struct ToolsArgs {
    /// Print only tool names, one per line.
    #[arg(long)]
    pub names: bool,
}

/// Executes the tools command.
pub async fn execute(args: &ToolsArgs, config: &VectoolConfig) -> anyhow::Result<()> {
    let store = shared::connect_store(config).await?;
    let dispatcher = shared::build_dispatcher(store, config)?;
    let tools = dispatcher.registry().list();

    if args.names {
        for tool in &tools {
            println!("{}", tool.name());
        }
        return Ok(());
    }

    let listing: Vec<_> = tools
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name(),
                "description": tool.description(),
                "input_schema": tool.input_schema(),
            })
        })
        .collect();
    output::print_json(&json!({ "tools": listing }))
}
