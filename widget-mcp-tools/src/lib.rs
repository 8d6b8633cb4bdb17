//! Sandboxed tool dispatch for widget generation agents.
//!
//! A [`WidgetServer`] owns a [`ToolRegistry`] of schema-described tools and a
//! single sandbox root. Every call is validated against the tool's
//! [`InputSchema`] before its handler runs, and every handler answers with a
//! [`ResponseEnvelope`].

pub mod artifacts;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod execution_context;
pub mod registry;
pub mod sandbox;
pub mod schema;
pub mod storage;
pub mod tools;

pub use artifacts::WidgetArtifacts;
pub use dispatcher::{ServerConfig, ServerState, WidgetServer};
pub use envelope::{Content, ResponseEnvelope};
pub use error::ToolError;
pub use execution_context::ExecutionContext;
pub use registry::{ToolRegistry, ToolSummary};
pub use schema::{FieldKind, FieldSpec, InputSchema, Presence, ValidatedArgs};
pub use storage::{Encoding, StorageError};
pub use tools::Tool;
