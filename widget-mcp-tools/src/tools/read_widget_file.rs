use crate::envelope::ResponseEnvelope;
use crate::error::ToolError;
use crate::execution_context::ExecutionContext;
use crate::sandbox::PathGuard;
use crate::schema::{FieldSpec, InputSchema, ValidatedArgs};
use crate::storage::{self, Encoding, StorageError};
use crate::tools::base::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Deserialize)]
struct ReadWidgetFileInput {
    path: String,
    encoding: Encoding,
}

#[derive(Clone)]
pub struct ReadWidgetFileTool {
    guard: Arc<PathGuard>,
}

impl ReadWidgetFileTool {
    pub fn new(guard: Arc<PathGuard>) -> Self {
        Self { guard }
    }
}

#[async_trait]
impl Tool for ReadWidgetFileTool {
    fn name(&self) -> &'static str {
        "read_widget_file"
    }

    fn description(&self) -> &'static str {
        "Read a file from the widgets directory"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::string("path").describe("Relative path within widgets directory"))
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
        let input: ReadWidgetFileInput = args.into_typed()?;
        let full_path = self.guard.resolve_file(&input.path)?;

        let doc = storage::read_document(&full_path, input.encoding)
            .await
            .map_err(|e| match e {
                StorageError::NotFound(_) => {
                    ToolError::NotFound(format!("File not found: {}", input.path))
                }
                other => ToolError::io(format!("Failed to read file {}", input.path), other),
            })?;

        debug!(call_id = %ctx.call_id, path = %full_path.display(), size = doc.size, "Widget file read");

        Ok(ResponseEnvelope::json(&json!({
            "path": input.path,
            "content": doc.content,
            "encoding": input.encoding,
            "size": doc.size,
            "modified": chrono::Utc::now().to_rfc3339(),
        }))?)
    }
}
