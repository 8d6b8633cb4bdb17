use crate::envelope::ResponseEnvelope;
use crate::error::ToolError;
use crate::execution_context::ExecutionContext;
use crate::sandbox::PathGuard;
use crate::schema::{FieldSpec, InputSchema, ValidatedArgs};
use crate::storage::{self, StorageError};
use crate::tools::base::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Deserialize)]
struct ListWidgetDirectoryInput {
    path: String,
}

#[derive(Clone)]
pub struct ListWidgetDirectoryTool {
    guard: Arc<PathGuard>,
}

impl ListWidgetDirectoryTool {
    pub fn new(guard: Arc<PathGuard>) -> Self {
        Self { guard }
    }
}

#[async_trait]
impl Tool for ListWidgetDirectoryTool {
    fn name(&self) -> &'static str {
        "list_widget_directory"
    }

    fn description(&self) -> &'static str {
        "List contents of a directory within widgets"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().field(
            FieldSpec::string("path")
                .with_default("")
                .describe("Relative path within widgets directory (empty for root)"),
        )
    }

    async fn execute(
        &self,
        ctx: ExecutionContext,
        args: ValidatedArgs,
    ) -> Result<ResponseEnvelope, ToolError> {
        let input: ListWidgetDirectoryInput = args.into_typed()?;
        let normalized = PathGuard::normalize(&input.path);
        let full_path = self.guard.resolve(&input.path)?;

        // Missing directories and non-directories are both "nothing to list".
        let items = storage::list_directory(&full_path)
            .await
            .map_err(|e| match e {
                StorageError::NotFound(_) | StorageError::InvalidArgument(_) => {
                    ToolError::NotFound(format!("Directory not found: {}", normalized))
                }
                other => ToolError::io(format!("Failed to list directory {}", normalized), other),
            })?;

        debug!(call_id = %ctx.call_id, path = %full_path.display(), count = items.len(), "Directory listed");

        Ok(ResponseEnvelope::json(&json!({
            "path": input.path,
            "items": items,
        }))?)
    }
}
