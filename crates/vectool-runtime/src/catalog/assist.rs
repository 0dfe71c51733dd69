//! AI-assist tools: prompt an external LLM command and return its stdout.

use std::io::ErrorKind as IoErrorKind;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::process::Command;
use tracing::debug;

use vectool_store::CallContext;
use vectool_types::{ToolArgument, ToolDefinition, ToolError};

use crate::args::ToolArgs;
use crate::types::{Tool, ToolHandler};

/// Declared deadline of the assist tools; LLM round-trips are slow.
const ASSIST_TIMEOUT: Duration = Duration::from_secs(120);

/// The external program behind the assist tools.
///
/// Invoked as `<program> <args...> -p <prompt>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for AssistCommand {
    fn default() -> Self {
        Self {
            program: "gemini".to_string(),
            args: Vec::new(),
        }
    }
}

impl AssistCommand {
    /// Runs the command with `prompt` and returns its stdout verbatim.
    ///
    /// The child is killed if the returned future is dropped.
    pub async fn run(&self, prompt: &str) -> Result<String, ToolError> {
        debug!(program = %self.program, prompt_len = prompt.len(), "running assist command");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("-p")
            .arg(prompt)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                IoErrorKind::NotFound => ToolError::fatal(format!(
                    "assist command '{}' not found; install it or set assist.command",
                    self.program
                )),
                _ => ToolError::fatal(format!(
                    "failed to run assist command '{}': {e}",
                    self.program
                )),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolError::fatal(format!(
                "assist command '{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Which assist prompt a tool sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistKind {
    SuggestSchema,
    RewriteQuery,
}

impl AssistKind {
    pub const ALL: [AssistKind; 2] = [Self::SuggestSchema, Self::RewriteQuery];

    pub fn name(self) -> &'static str {
        match self {
            Self::SuggestSchema => "ai_suggest_schema",
            Self::RewriteQuery => "ai_rewrite_query",
        }
    }

    pub fn definition(self) -> ToolDefinition {
        match self {
            Self::SuggestSchema => ToolDefinition::new(
                self.name(),
                "Ask an LLM to suggest a collection schema for the described data",
            )
            .arg(ToolArgument::required(
                "description",
                "string",
                "Description of the data to be stored",
            )),
            Self::RewriteQuery => ToolDefinition::new(
                self.name(),
                "Ask an LLM to rewrite a search query for better retrieval",
            )
            .arg(ToolArgument::required("query", "string", "Query to rewrite"))
            .arg(ToolArgument::optional(
                "collection",
                "string",
                "Collection the query targets",
            )),
        }
    }

    /// Builds the prompt from validated arguments.
    pub fn prompt(self, args: &ToolArgs) -> Result<String, ToolError> {
        match self {
            Self::SuggestSchema => {
                let description = args.require_str("description")?;
                Ok(format!(
                    "Suggest a vector collection schema for the following data. \
                     Give the collection type, the metadata fields with their JSON types, \
                     and which field should be embedded. Respond with JSON only.\n\n\
                     Data: {description}"
                ))
            }
            Self::RewriteQuery => {
                let query = args.require_str("query")?;
                let target = match args.optional_str("collection")? {
                    Some(c) => format!(" against the collection '{c}'"),
                    None => String::new(),
                };
                Ok(format!(
                    "Rewrite the following search query to improve semantic retrieval{target}. \
                     Respond with the rewritten query only.\n\nQuery: {query}"
                ))
            }
        }
    }

    pub fn tool(self, command: AssistCommand) -> Tool {
        Tool::new(
            self.definition(),
            Arc::new(AssistHandler {
                kind: self,
                command,
            }),
        )
        .with_timeout(ASSIST_TIMEOUT)
    }
}

struct AssistHandler {
    kind: AssistKind,
    command: AssistCommand,
}

#[async_trait]
impl ToolHandler for AssistHandler {
    async fn call(&self, _ctx: &CallContext, args: ToolArgs) -> Result<Value, ToolError> {
        let prompt = self.kind.prompt(&args)?;
        let output = self.command.run(&prompt).await?;
        Ok(json!({ "output": output }))
    }
}
