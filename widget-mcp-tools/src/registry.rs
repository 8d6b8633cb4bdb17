use crate::tools::Tool;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Discovery view of one registered tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSummary {
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Insert a tool, replacing any earlier tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::debug!(tool = %name, "Replaced previously registered tool");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Every tool keyed by name with its description and input schema.
    pub fn list_all(&self) -> BTreeMap<String, ToolSummary> {
        self.tools
            .iter()
            .map(|(name, tool)| {
                (
                    name.clone(),
                    ToolSummary {
                        description: tool.description().to_string(),
                        input_schema: tool.input_schema().to_json_schema(),
                    },
                )
            })
            .collect()
    }

    /// Function-calling declarations, sorted by tool name.
    pub fn schemas(&self) -> Vec<Value> {
        self.list_all()
            .into_iter()
            .map(|(name, summary)| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": name,
                        "description": summary.description,
                        "parameters": summary.input_schema
                    }
                })
            })
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
