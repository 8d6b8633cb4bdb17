use crate::envelope::ResponseEnvelope;
use crate::error::ToolError;
use crate::execution_context::ExecutionContext;
use crate::sandbox::PathGuard;
use crate::schema::{FieldSpec, InputSchema, ValidatedArgs};
use crate::storage::{self, Encoding};
use crate::tools::base::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
struct WriteWidgetFileInput {
    path: String,
    content: String,
    encoding: Encoding,
}

#[derive(Clone)]
pub struct WriteWidgetFileTool {
    guard: Arc<PathGuard>,
}

impl WriteWidgetFileTool {
    pub fn new(guard: Arc<PathGuard>) -> Self {
        Self { guard }
    }
}

#[async_trait]
impl Tool for WriteWidgetFileTool {
    fn name(&self) -> &'static str {
        "write_widget_file"
    }

    fn description(&self) -> &'static str {
        "Write a file to the widgets directory"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::string("path").describe("Relative path within widgets directory"))
            .field(FieldSpec::string("content").describe("File content to write"))
            .field(
                FieldSpec::enumeration("encoding", super::encoding_values())
                    .with_default(Encoding::Utf8.as_str())
                    .describe("File encoding"),
            )
    }

    async fn execute(
        &self,
        ctx: ExecutionContext,
        args: ValidatedArgs,
    ) -> Result<ResponseEnvelope, ToolError> {
        let input: WriteWidgetFileInput = args.into_typed()?;
        let full_path = self.guard.resolve_file(&input.path)?;

        let size = storage::write_document(&full_path, &input.content, input.encoding)
            .await
            .map_err(|e| ToolError::io(format!("Failed to write file {}", input.path), e))?;

        let full_path = full_path.display().to_string();
        info!(call_id = %ctx.call_id, path = %full_path, size, "Widget file written");

        Ok(ResponseEnvelope::json(&json!({
            "path": input.path,
            "fullPath": full_path,
            "size": size,
            "encoding": input.encoding,
            "message": format!("Successfully wrote {} bytes to {}", size, input.path),
        }))?)
    }
}
