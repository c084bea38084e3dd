use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::model::todo::TodoDocument;

/// Placeholder written to a missing or empty store before it is read
const EMPTY_DOCUMENT: &[u8] = b"{}";

/// Error type for store I/O operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not decode todo file: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("could not encode todo file: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Decode a store document. Blank input is an empty forest.
pub fn decode(bytes: &[u8]) -> Result<TodoDocument, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(TodoDocument::default());
    }
    serde_json::from_slice(bytes).map_err(StoreError::Decode)
}

/// Encode a store document as JSON indented by four spaces.
pub fn encode(doc: &TodoDocument) -> Result<Vec<u8>, StoreError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    doc.serialize(&mut ser).map_err(StoreError::Encode)?;
    Ok(out)
}

/// Load the store at `path`, initialising it with `{}` when it is missing
/// or empty.
pub fn load_store(path: &Path) -> Result<TodoDocument, StoreError> {
    let is_blank = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    if is_blank {
        tracing::debug!(path = %path.display(), "initialising empty todo file");
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StoreError::Write {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(path, EMPTY_DOCUMENT).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let bytes = fs::read(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let doc = decode(&bytes)?;
    tracing::debug!(path = %path.display(), roots = doc.todos.len(), "loaded todo file");
    Ok(doc)
}

/// Write the store back to disk, replacing the previous file in one step.
pub fn save_store(path: &Path, doc: &TodoDocument) -> Result<(), StoreError> {
    let content = encode(doc)?;
    atomic_write(path, &content).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), roots = doc.todos.len(), "saved todo file");
    Ok(())
}

/// Write to a temp file in the same directory, then rename over `path`.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
