//! Locating the generated widget files handed to the lint/eval runner.

use crate::storage::{DirEntry, EntryType};
use serde::{Deserialize, Serialize};
use std::path::Path;

const INDEX_FILE: &str = "index.js";
const COMPONENT_FILE: &str = "component.tsx";

/// The `index.js` / `component.tsx` pair produced for one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetArtifacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub index_path: Option<String>,
    pub component_path: Option<String>,
}

impl WidgetArtifacts {
    /// Classify written paths. A later path of the same kind wins.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut artifacts = Self::default();
        for path in paths {
            artifacts.record(path.as_ref());
        }
        artifacts
    }

    /// Classify the files of a directory listing.
    pub fn from_listing(entries: &[DirEntry]) -> Self {
        Self::from_paths(
            entries
                .iter()
                .filter(|e| e.entry_type == EntryType::File)
                .map(|e| e.path.as_str()),
        )
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Remember `path` if it names an index or component file.
    pub fn record(&mut self, path: &str) -> bool {
        match Path::new(path).file_name().and_then(|n| n.to_str()) {
            Some(INDEX_FILE) => self.index_path = Some(path.to_string()),
            Some(COMPONENT_FILE) => self.component_path = Some(path.to_string()),
            _ => return false,
        }
        true
    }

    pub fn is_complete(&self) -> bool {
        self.index_path.is_some() && self.component_path.is_some()
    }
}
