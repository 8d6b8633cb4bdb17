use crate::envelope::ResponseEnvelope;
use crate::error::ToolError;
use crate::execution_context::ExecutionContext;
use crate::registry::{ToolRegistry, ToolSummary};
use crate::sandbox::PathGuard;
use crate::storage;
use crate::tools::{
    ListWidgetDirectoryTool, ReadDocumentationTool, ReadWidgetFileTool, ReadWidgetTemplatesTool,
    Tool, WriteWidgetFileTool,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Locations the built-in tools operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub sandbox_root: PathBuf,
    pub docs_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            sandbox_root: PathBuf::from("widgets"),
            docs_root: PathBuf::from("llms/shared"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Uninitialized,
    Started,
    Serving,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServerState::Uninitialized => "uninitialized",
            ServerState::Started => "started",
            ServerState::Serving => "serving",
        };
        f.write_str(s)
    }
}

pub struct WidgetServer {
    registry: ToolRegistry,
    guard: Arc<PathGuard>,
    state: ServerState,
}

impl WidgetServer {
    /// Server with the five built-in widget tools registered.
    pub fn new(config: ServerConfig) -> Self {
        let guard = Arc::new(PathGuard::new(config.sandbox_root));
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(WriteWidgetFileTool::new(guard.clone())))
            .register(Arc::new(ReadWidgetFileTool::new(guard.clone())))
            .register(Arc::new(ListWidgetDirectoryTool::new(guard.clone())))
            .register(Arc::new(ReadWidgetTemplatesTool::new(guard.clone())))
            .register(Arc::new(ReadDocumentationTool::new(config.docs_root)));

        Self {
            registry,
            guard,
            state: ServerState::Uninitialized,
        }
    }

    /// Register an extra tool. A tool with the same name is replaced.
    pub fn register_tool(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        self.registry.register(tool);
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn sandbox_root(&self) -> &Path {
        self.guard.root()
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Capability listing: every tool's description and input schema.
    pub fn list_tools(&self) -> BTreeMap<String, ToolSummary> {
        self.registry.list_all()
    }

    /// Make sure the sandbox root exists and begin serving.
    ///
    /// A failure here is fatal for the host and is returned as is.
    pub async fn start(&mut self) -> Result<(), ToolError> {
        self.state = ServerState::Started;
        let root = self.guard.root();

        match storage::ensure_directory(root).await {
            Ok(created) => {
                self.state = ServerState::Serving;
                info!(
                    sandbox_root = %root.display(),
                    created,
                    tools = self.registry.count(),
                    "Widget MCP Server initialized"
                );
                Ok(())
            }
            Err(e) => {
                error!(sandbox_root = %root.display(), error = %e, "Failed to create widgets directory");
                self.state = ServerState::Uninitialized;
                Err(ToolError::io(
                    format!("Failed to create widgets directory {}", root.display()),
                    e,
                ))
            }
        }
    }

    /// Look up, validate and run one tool call.
    pub async fn execute_tool(&self, name: &str, args: Value) -> Result<ResponseEnvelope, ToolError> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;

        if self.state != ServerState::Serving {
            return Err(ToolError::NotServing(self.state.to_string()));
        }

        let validated = tool.input_schema().validate(&args)?;

        let ctx = ExecutionContext::new(name);
        let call_id = ctx.call_id.clone();
        debug!(tool = name, call_id = %call_id, "Dispatching tool");

        let result = tool.execute(ctx, validated).await;
        if let Err(e) = &result {
            warn!(tool = name, call_id = %call_id, error = %e, "Tool call failed");
        }
        result
    }
}
