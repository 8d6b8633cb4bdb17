use crate::error::ToolError;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Resolves caller-supplied relative paths against the sandbox root.
#[derive(Debug, Clone)]
pub struct PathGuard {
    sandbox_root: PathBuf,
}

impl PathGuard {
    /// The root does not need to exist yet; it is created by the server's
    /// start-up step.
    pub fn new(sandbox_root: impl Into<PathBuf>) -> Self {
        Self {
            sandbox_root: sandbox_root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.sandbox_root
    }

    /// Strip exactly one leading separator.
    pub fn normalize(path: &str) -> &str {
        path.strip_prefix('/')
            .or_else(|| path.strip_prefix(std::path::MAIN_SEPARATOR))
            .unwrap_or(path)
    }

    /// Map `path` to a location under the sandbox root.
    ///
    /// An empty path (after normalization) is the root itself. The target
    /// does not have to exist, but every existing ancestor must canonicalize
    /// to somewhere inside the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, ToolError> {
        let relative = Path::new(Self::normalize(path));

        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => {
                    return Err(ToolError::SandboxViolation(format!(
                        "Path traversal detected: {}",
                        path
                    )));
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(ToolError::SandboxViolation(format!(
                        "Absolute paths not allowed: {}",
                        path
                    )));
                }
            }
        }

        let full_path = if relative.as_os_str().is_empty() {
            self.sandbox_root.clone()
        } else {
            self.sandbox_root.join(relative)
        };
        self.check_symlinks(relative)?;
        Ok(full_path)
    }

    /// Like [`resolve`](Self::resolve), but the path must name something
    /// below the root. `""`, `"/"` and `"."` are rejected.
    pub fn resolve_file(&self, path: &str) -> Result<PathBuf, ToolError> {
        let names_entry = Path::new(Self::normalize(path))
            .components()
            .any(|c| matches!(c, Component::Normal(_)));
        if !names_entry {
            return Err(ToolError::Validation(format!(
                "Path must name a file inside the sandbox: '{}'",
                path
            )));
        }
        self.resolve(path)
    }

    fn check_symlinks(&self, relative: &Path) -> Result<(), ToolError> {
        let canonical_root = match fs::canonicalize(&self.sandbox_root) {
            Ok(root) => root,
            // Nothing under a missing root can be a symlink.
            Err(_) => return Ok(()),
        };

        let mut current = self.sandbox_root.clone();
        for component in relative.components() {
            current.push(component);
            if fs::symlink_metadata(&current).is_err() {
                break;
            }
            let canonical = fs::canonicalize(&current).map_err(|_| {
                ToolError::SandboxViolation(format!(
                    "Path is inaccessible: {}",
                    relative.display()
                ))
            })?;
            if !canonical.starts_with(&canonical_root) {
                return Err(ToolError::SandboxViolation(format!(
                    "Symlink escapes sandbox: {}",
                    relative.display()
                )));
            }
        }

        Ok(())
    }
}
