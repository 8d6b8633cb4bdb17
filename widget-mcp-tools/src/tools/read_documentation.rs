use crate::envelope::ResponseEnvelope;
use crate::error::ToolError;
use crate::execution_context::ExecutionContext;
use crate::schema::{FieldSpec, InputSchema, ValidatedArgs};
use crate::storage::{self, Encoding};
use crate::tools::base::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use tracing::{debug, info};

const GUIDELINES: &[&str] = &["Follow the instructions in the documentation"];

/// Documentation topics, one markdown file each under the docs root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocTopic {
    Components,
    Instructions,
    Modules,
    Server,
    Stores,
    Views,
    Overview,
}

impl DocTopic {
    pub const ALL: [DocTopic; 7] = [
        DocTopic::Components,
        DocTopic::Instructions,
        DocTopic::Modules,
        DocTopic::Server,
        DocTopic::Stores,
        DocTopic::Views,
        DocTopic::Overview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocTopic::Components => "components",
            DocTopic::Instructions => "instructions",
            DocTopic::Modules => "modules",
            DocTopic::Server => "server",
            DocTopic::Stores => "stores",
            DocTopic::Views => "views",
            DocTopic::Overview => "overview",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            DocTopic::Components => "components.md",
            DocTopic::Instructions => "instructions.md",
            DocTopic::Modules => "modules.md",
            DocTopic::Server => "server.md",
            DocTopic::Stores => "stores.md",
            DocTopic::Views => "views.md",
            DocTopic::Overview => "README.md",
        }
    }
}

#[derive(Deserialize)]
struct ReadDocumentationInput {
    #[serde(rename = "templateType")]
    topic: DocTopic,
}

#[derive(Clone)]
pub struct ReadDocumentationTool {
    docs_root: PathBuf,
}

impl ReadDocumentationTool {
    pub fn new(docs_root: impl Into<PathBuf>) -> Self {
        Self {
            docs_root: docs_root.into(),
        }
    }
}

#[async_trait]
impl Tool for ReadDocumentationTool {
    fn name(&self) -> &'static str {
        "read_documentation"
    }

    fn description(&self) -> &'static str {
        "Read all documentation for insights on how to build widgets"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().field(
            FieldSpec::enumeration("templateType", DocTopic::ALL.iter().map(DocTopic::as_str))
                .with_default(DocTopic::Overview.as_str())
                .describe("Type of doc to read"),
        )
    }

    async fn execute(
        &self,
        ctx: ExecutionContext,
        args: ValidatedArgs,
    ) -> Result<ResponseEnvelope, ToolError> {
        let input: ReadDocumentationInput = args.into_typed()?;
        info!(call_id = %ctx.call_id, topic = input.topic.as_str(), "LLM read doc");

        let mut templates = Map::new();
        let path = self.docs_root.join(input.topic.file_name());
        match storage::read_document(&path, Encoding::Utf8).await {
            Ok(doc) => {
                templates.insert(input.topic.as_str().to_string(), Value::String(doc.content));
            }
            Err(e) => {
                debug!(call_id = %ctx.call_id, error = %e, "Documentation unavailable");
            }
        }

        Ok(ResponseEnvelope::json(&json!({
            "templates": templates,
            "guidelines": GUIDELINES,
        }))?)
    }
}
