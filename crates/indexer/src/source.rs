use crate::error::{IndexerError, Result};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Where note bodies come from.
///
/// Listing is all-or-nothing; a single fetch may fail without affecting the others.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Every note path in the collection (directories excluded)
    async fn list_documents(&self) -> Result<Vec<String>>;

    /// Raw text of one note
    async fn fetch_document(&self, path: &str) -> Result<String>;
}

/// Notes stored as markdown files under a local directory
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        (!escapes).then(|| self.root.join(relative))
    }
}

#[async_trait]
impl ContentSource for FsContentSource {
    async fn list_documents(&self) -> Result<Vec<String>> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || scan_notes(&root))
            .await
            .map_err(|e| IndexerError::SourceListingFailed(format!("scan task failed: {e}")))?
    }

    async fn fetch_document(&self, path: &str) -> Result<String> {
        let full = self
            .resolve(path)
            .ok_or_else(|| IndexerError::DocumentFetchFailed {
                path: path.to_string(),
                message: "path escapes the collection root".to_string(),
            })?;
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| IndexerError::DocumentFetchFailed {
                path: path.to_string(),
                message: e.to_string(),
            })
    }
}

fn scan_notes(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(IndexerError::SourceListingFailed(format!(
            "not a directory: {}",
            root.display()
        )));
    }

    let mut paths = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry.map_err(|e| IndexerError::SourceListingFailed(e.to_string()))?;
        if !entry.file_type().is_file() || !is_note(entry.path()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        paths.push(parts.join("/"));
    }

    paths.sort();
    Ok(paths)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_note(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
}
