use crate::envelope::ResponseEnvelope;
use crate::error::ToolError;
use crate::execution_context::ExecutionContext;
use crate::sandbox::PathGuard;
use crate::schema::{FieldSpec, InputSchema, ValidatedArgs};
use crate::storage::{self, Encoding};
use crate::tools::base::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

const COMPONENT_TEMPLATE: &str = "templates/component-template.tsx";
const INDEX_TEMPLATE: &str = "templates/index-template.ts";

const GUIDELINES: &[&str] = &[
    "Always use the exact import paths shown above",
    "Extend WidgetProps interface for custom props",
    "Use BaseWidget as the root component",
    "Follow the component structure in the template",
    "Include proper TypeScript typing",
    "Use Tailwind CSS for styling",
    "Replace MyWidget with your actual widget name",
    "Update the widget ID, name, and description in index.js",
    "Set appropriate default width and height",
    "Include proper state management with useState",
    "Add useEffect for initialization and cleanup",
    "Use theme and size props for customization",
    "CRITICAL: Always provide unique 'key' props when rendering arrays or lists",
    "CRITICAL: Use map() with proper keys: items.map((item, index) => <div key={item.id || index}>...)",
    "CRITICAL: Avoid creating implicit JSX arrays - use single elements or proper keyed arrays",
    "CRITICAL: When using conditional rendering with multiple elements, wrap in fragments or single containers",
    "CRITICAL: For dynamic lists, use stable unique identifiers as keys, not just array indices when possible",
    "CRITICAL: Find more detailed information on how to use the software in the read_documentation tool",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Component,
    Index,
    All,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [TemplateKind::Component, TemplateKind::Index, TemplateKind::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Component => "component",
            TemplateKind::Index => "index",
            TemplateKind::All => "all",
        }
    }

    /// Template files selected by this kind, keyed by their payload name.
    fn files(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            TemplateKind::Component => &[("component", COMPONENT_TEMPLATE)],
            TemplateKind::Index => &[("index", INDEX_TEMPLATE)],
            TemplateKind::All => &[("component", COMPONENT_TEMPLATE), ("index", INDEX_TEMPLATE)],
        }
    }
}

#[derive(Deserialize)]
struct ReadWidgetTemplatesInput {
    #[serde(rename = "templateType")]
    template_type: TemplateKind,
}

#[derive(Clone)]
pub struct ReadWidgetTemplatesTool {
    guard: Arc<PathGuard>,
}

impl ReadWidgetTemplatesTool {
    pub fn new(guard: Arc<PathGuard>) -> Self {
        Self { guard }
    }
}

#[async_trait]
impl Tool for ReadWidgetTemplatesTool {
    fn name(&self) -> &'static str {
        "read_widget_templates"
    }

    fn description(&self) -> &'static str {
        "Read all widget templates including component and index templates with guidelines"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().field(
            FieldSpec::enumeration("templateType", TemplateKind::ALL.iter().map(TemplateKind::as_str))
                .with_default(TemplateKind::All.as_str())
                .describe("Type of template to read"),
        )
    }

    async fn execute(
        &self,
        ctx: ExecutionContext,
        args: ValidatedArgs,
    ) -> Result<ResponseEnvelope, ToolError> {
        let input: ReadWidgetTemplatesInput = args.into_typed()?;

        let mut templates = Map::new();
        for (key, relative) in input.template_type.files() {
            let path = self.guard.resolve(relative)?;
            // An absent template leaves its key out; it is not an error.
            match storage::read_document(&path, Encoding::Utf8).await {
                Ok(doc) => {
                    templates.insert((*key).to_string(), Value::String(doc.content));
                }
                Err(e) => {
                    debug!(call_id = %ctx.call_id, template = key, error = %e, "Template unavailable");
                }
            }
        }

        Ok(ResponseEnvelope::json(&json!({
            "templates": templates,
            "importPaths": {
                "BaseWidget": "import BaseWidget from '../../templates/BaseWidget';",
                "WidgetProps": "import { WidgetProps } from '../../index';",
                "React": "import React, { useState, useEffect } from 'react';"
            },
            "guidelines": GUIDELINES,
        }))?)
    }
}
