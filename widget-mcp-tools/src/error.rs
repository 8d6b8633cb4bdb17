use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Tool {0} not found")]
    ToolNotFound(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: StorageError,
    },

    #[error("Sandbox violation: {0}")]
    SandboxViolation(String),

    #[error("Server is not serving (state: {0})")]
    NotServing(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Wraps a storage failure with the handler's context.
    pub fn io(context: impl Into<String>, source: StorageError) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
