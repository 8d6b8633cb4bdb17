use serde::{Deserialize, Serialize};

/// Per-call context handed to a tool handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub call_id: String,
    pub tool: String,
}

impl ExecutionContext {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            call_id: uuid::Uuid::new_v4().to_string(),
            tool: tool.into(),
        }
    }
}
