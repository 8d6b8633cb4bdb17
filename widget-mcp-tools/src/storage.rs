//! Storage shim - uniform async file operations over the widget tree
//!
//! Every operation returns a [`StorageResult`]. Failures are logged here once
//! and handed back to the caller, which decides whether they are fatal.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Content encoding accepted by read and write operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Utf8,
    Base64,
}

impl Encoding {
    pub const ALL: [Encoding; 2] = [Encoding::Utf8, Encoding::Base64];

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Base64 => "base64",
        }
    }

    /// Turns caller-supplied text into the bytes that land on disk.
    pub fn decode(&self, content: &str) -> StorageResult<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(content.as_bytes().to_vec()),
            Encoding::Base64 => STANDARD
                .decode(content)
                .map_err(|e| StorageError::Decode(e.to_string())),
        }
    }

    /// Turns bytes read from disk into text for the caller.
    pub fn encode(&self, bytes: Vec<u8>) -> StorageResult<String> {
        match self {
            Encoding::Utf8 => {
                String::from_utf8(bytes).map_err(|_| StorageError::Decode("Invalid UTF-8".into()))
            }
            Encoding::Base64 => Ok(STANDARD.encode(bytes)),
        }
    }
}

/// A file read fully into memory. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDocument {
    pub content: String,
    pub encoding: Option<Encoding>,
    /// Size of the file on disk in bytes.
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub path: String,
}

fn logged<T>(op: &str, path: &Path, result: StorageResult<T>) -> StorageResult<T> {
    if let Err(e) = &result {
        warn!(path = %path.display(), error = %e, "Error {}", op);
    }
    result
}

fn not_found_or_io(path: &Path, err: std::io::Error) -> StorageError {
    if err.kind() == ErrorKind::NotFound {
        StorageError::NotFound(path.display().to_string())
    } else {
        StorageError::Io(err)
    }
}

/// Create a directory and any missing parents.
///
/// Returns `true` when the directory was created and `false` when it was
/// already there.
pub async fn ensure_directory<P: AsRef<Path>>(path: P) -> StorageResult<bool> {
    let path = path.as_ref();
    logged("making directory", path, create_if_missing(path).await)
}

/// Snapshot of the immediate children of a directory, sorted by name.
pub async fn list_directory<P: AsRef<Path>>(path: P) -> StorageResult<Vec<DirEntry>> {
    let path = path.as_ref();
    logged("reading directory", path, read_entries(path).await)
}

/// Read a whole file, rendering its bytes with `encoding`.
pub async fn read_document<P: AsRef<Path>>(
    path: P,
    encoding: Encoding,
) -> StorageResult<FileDocument> {
    let path = path.as_ref();
    logged("reading document", path, read_file(path, encoding).await)
}

/// Write `content` to `path`, replacing any previous file.
///
/// Parent directories are created as needed. The data is synced and moved
/// into place before this returns, so readers never see a partial file.
/// Returns the number of bytes written.
pub async fn write_document<P: AsRef<Path>>(
    path: P,
    content: &str,
    encoding: Encoding,
) -> StorageResult<usize> {
    let path = path.as_ref();
    logged("writing document", path, write_file(path, content, encoding).await)
}

async fn create_if_missing(path: &Path) -> StorageResult<bool> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(false),
        Ok(_) => Err(StorageError::InvalidArgument(format!(
            "{} exists and is not a directory",
            path.display()
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(path).await?;
            debug!(path = %path.display(), "Created directory");
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}

async fn read_entries(path: &Path) -> StorageResult<Vec<DirEntry>> {
    let meta = fs::metadata(path)
        .await
        .map_err(|e| not_found_or_io(path, e))?;
    if !meta.is_dir() {
        return Err(StorageError::InvalidArgument(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    let mut entries = Vec::new();
    let mut dir = fs::read_dir(path).await?;
    while let Some(entry) = dir.next_entry().await? {
        let entry_type = if entry.file_type().await?.is_dir() {
            EntryType::Directory
        } else {
            EntryType::File
        };
        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            entry_type,
            path: entry.path().display().to_string(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

async fn read_file(path: &Path, encoding: Encoding) -> StorageResult<FileDocument> {
    let bytes = fs::read(path).await.map_err(|e| not_found_or_io(path, e))?;
    let size = bytes.len();
    Ok(FileDocument {
        content: encoding.encode(bytes)?,
        encoding: Some(encoding),
        size,
    })
}

async fn write_file(path: &Path, content: &str, encoding: Encoding) -> StorageResult<usize> {
    let bytes = encoding.decode(content)?;
    if path.file_name().is_none() {
        return Err(StorageError::InvalidArgument("Path has no file name".into()));
    }
    if fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false) {
        return Err(StorageError::InvalidArgument(format!(
            "{} is a directory",
            path.display()
        )));
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).await?;

    let target = path.to_path_buf();
    let size = bytes.len();
    tokio::task::spawn_blocking(move || persist_in(&parent, &target, &bytes))
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e)))??;

    debug!(path = %path.display(), bytes = size, "Wrote document");
    Ok(size)
}

/// Write through a uniquely named temp file in `dir`, then rename it over
/// `target`. The temp file is removed on every failure path.
fn persist_in(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut temp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_directory_reports_creation_once() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b");

        assert!(ensure_directory(&target).await.unwrap());
        assert!(!ensure_directory(&target).await.unwrap());
    }

    #[tokio::test]
    async fn ensure_directory_rejects_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("file");
        fs::write(&target, "x").await.unwrap();

        let result = ensure_directory(&target).await;
        assert!(matches!(result, Err(StorageError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn read_missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_document(dir.path().join("nope.txt"), Encoding::Utf8).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn write_creates_parents_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x/y/index.js");

        let written = write_document(&target, "export {}", Encoding::Utf8)
            .await
            .unwrap();
        assert_eq!(written, 9);

        let entries = list_directory(dir.path().join("x/y")).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "index.js");
        assert_eq!(entries[0].entry_type, EntryType::File);
    }

    #[tokio::test]
    async fn base64_write_stores_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("blob.bin");

        let written = write_document(&target, "AAEC/w==", Encoding::Base64)
            .await
            .unwrap();
        assert_eq!(written, 4);
        assert_eq!(fs::read(&target).await.unwrap(), vec![0u8, 1, 2, 255]);

        let doc = read_document(&target, Encoding::Base64).await.unwrap();
        assert_eq!(doc.content, "AAEC/w==");
        assert_eq!(doc.size, 4);
    }

    #[tokio::test]
    async fn invalid_base64_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_document(dir.path().join("f"), "not base64!", Encoding::Base64).await;
        assert!(matches!(result, Err(StorageError::Decode(_))));
    }

    #[tokio::test]
    async fn write_keeps_existing_temp_named_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let sibling = dir.path().join(".x.tmp");
        fs::write(&sibling, "keep me").await.unwrap();

        write_document(dir.path().join("x"), "new", Encoding::Utf8)
            .await
            .unwrap();

        assert_eq!(fs::read_to_string(&sibling).await.unwrap(), "keep me");
        assert_eq!(fs::read_to_string(dir.path().join("x")).await.unwrap(), "new");
        let names: Vec<String> = list_directory(dir.path())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec![".x.tmp".to_string(), "x".to_string()]);
    }

    #[tokio::test]
    async fn write_onto_directory_touches_nothing_beside_it() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("widgets");
        fs::create_dir(&target).await.unwrap();
        let neighbour = dir.path().join(".widgets.tmp");
        fs::write(&neighbour, "outside").await.unwrap();

        let result = write_document(&target, "x", Encoding::Utf8).await;

        assert!(matches!(result, Err(StorageError::InvalidArgument(_))));
        assert_eq!(fs::read_to_string(&neighbour).await.unwrap(), "outside");
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn list_missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = list_directory(dir.path().join("missing")).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
