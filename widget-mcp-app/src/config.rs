use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use widget_mcp_tools::ServerConfig;

pub const DEFAULT_CONFIG_PATH: &str = "widget-mcp.yaml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sandbox_root: PathBuf,
    pub docs_root: PathBuf,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        let server = ServerConfig::default();
        Self {
            sandbox_root: server.sandbox_root,
            docs_root: server.docs_root,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().exists()
    }

    /// Load from `path`, falling back to defaults when the file is absent,
    /// then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if Self::exists(path) {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.sandbox_root.as_os_str().is_empty() {
            anyhow::bail!("sandbox_root cannot be empty");
        }
        if self.docs_root.as_os_str().is_empty() {
            anyhow::bail!("docs_root cannot be empty");
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(root) = std::env::var("WIDGET_MCP_SANDBOX_ROOT") {
            self.sandbox_root = PathBuf::from(root);
        }
        if let Ok(root) = std::env::var("WIDGET_MCP_DOCS_ROOT") {
            self.docs_root = PathBuf::from(root);
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            sandbox_root: self.sandbox_root.clone(),
            docs_root: self.docs_root.clone(),
        }
    }
}
