use crate::envelope::ResponseEnvelope;
use crate::error::ToolError;
use crate::execution_context::ExecutionContext;
use crate::schema::{InputSchema, ValidatedArgs};
use async_trait::async_trait;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> InputSchema;

    /// Run the tool. `args` has already passed [`Tool::input_schema`].
    async fn execute(
        &self,
        ctx: ExecutionContext,
        args: ValidatedArgs,
    ) -> Result<ResponseEnvelope, ToolError>;
}
