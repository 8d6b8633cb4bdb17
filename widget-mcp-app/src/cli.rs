//! Command-line front end driving a [`WidgetServer`] in-process.

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use widget_mcp_tools::storage::DirEntry;
use widget_mcp_tools::{WidgetArtifacts, WidgetServer};

#[derive(Debug, Parser)]
#[command(name = "widget-mcp", version, about = "Sandboxed widget file tools for generation agents")]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, global = true, env = "WIDGET_MCP_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every tool's description and input schema
    Tools,
    /// Print function-calling declarations for every tool
    Schemas,
    /// Run one tool call and print its response envelope
    Call {
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Find the index and component files of a generated widget
    Locate {
        /// Widget directory, relative to the sandbox root
        dir: String,
        #[arg(long)]
        prompt: Option<String>,
    },
}

/// Run `command` and return what should be printed.
pub async fn execute(command: Command, config: &Config) -> Result<Value> {
    let mut server = WidgetServer::new(config.server_config());

    match command {
        Command::Tools => Ok(serde_json::to_value(server.list_tools())?),
        Command::Schemas => Ok(Value::Array(server.registry().schemas())),
        Command::Call { tool, args } => {
            let args: Value = serde_json::from_str(&args).context("--args must be valid JSON")?;
            server.start().await?;
            let envelope = server.execute_tool(&tool, args).await?;
            Ok(serde_json::to_value(envelope)?)
        }
        Command::Locate { dir, prompt } => {
            server.start().await?;
            let payload = server
                .execute_tool("list_widget_directory", serde_json::json!({ "path": dir }))
                .await?
                .payload()?;
            let entries: Vec<DirEntry> = serde_json::from_value(payload["items"].clone())?;

            let mut artifacts = WidgetArtifacts::from_listing(&entries);
            if let Some(prompt) = prompt {
                artifacts = artifacts.with_prompt(prompt);
            }
            if !artifacts.is_complete() {
                tracing::warn!(dir = %dir, "Widget directory is missing index.js or component.tsx");
            }
            Ok(serde_json::to_value(artifacts)?)
        }
    }
}
