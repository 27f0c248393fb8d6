//! Content collection.
//!
//! Walks a content directory and loads every file into a [`DocumentSet`],
//! keyed by its `/`-separated path relative to the directory.

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use simplesearch_core::{Document, DocumentSet, document_from_source};
use tracing::{debug, info, warn};

/// Extensions whose frontmatter is lifted into document metadata.
const SOURCE_EXTENSIONS: &[&str] = &["md", "markdown", "html", "htm"];

/// Collect every file under `dir`, hidden files included.
///
/// Files are visited in file-name order so the resulting set, and therefore
/// the search index built from it, is deterministic.
pub fn collect(dir: &Path) -> Result<DocumentSet> {
    info!(dir = %dir.display(), "collecting content");

    let mut documents = DocumentSet::new();

    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.wrap_err_with(|| format!("Failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let key = document_key(dir, path);
        let bytes =
            std::fs::read(path).wrap_err_with(|| format!("Failed to read {}", path.display()))?;

        debug!(key = %key, bytes = bytes.len(), "collected file");
        documents.insert(key, load_document(path, bytes));
    }

    info!(count = documents.len(), "collected content");
    Ok(documents)
}

/// Relative key of `path` with `/` separators on every platform.
fn document_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn load_document(path: &Path, bytes: Vec<u8>) -> Document {
    let is_source = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));

    if !is_source {
        return Document::new(bytes);
    }

    let text = match std::str::from_utf8(&bytes) {
        Ok(text) => text,
        Err(_) => {
            debug!(path = %path.display(), "not valid UTF-8, keeping raw bytes");
            return Document::new(bytes);
        }
    };

    match document_from_source(text, path) {
        Ok(document) => document,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse frontmatter, keeping file verbatim");
            Document::new(bytes)
        }
    }
}
