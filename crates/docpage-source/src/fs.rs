//! Filesystem document source.

use std::path::{Component, Path, PathBuf};

use crate::source::{DocumentSource, SourceError, SourceErrorKind, document_path};

const BACKEND: &str = "Fs";

/// Reads documents from a directory on disk.
///
/// Section folders are taken relative to the root, so a folder of
/// `/static/docs/commands` reads from `{root}/static/docs/commands`.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a folder/file pair to a path under the root.
    ///
    /// Rejects parent-directory components so documents cannot be read from
    /// outside the root.
    fn resolve(&self, folder: &str, file: &str) -> Result<PathBuf, SourceError> {
        let relative = document_path(folder, file);
        let relative = Path::new(relative.trim_start_matches('/'));

        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || file.is_empty() {
            return Err(SourceError::new(SourceErrorKind::InvalidPath)
                .with_backend(BACKEND)
                .with_path(relative.display().to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl DocumentSource for FsSource {
    fn fetch(&self, folder: &str, file: &str) -> Result<String, SourceError> {
        let path = self.resolve(folder, file)?;
        tracing::debug!(path = %path.display(), "Reading document");
        std::fs::read_to_string(&path)
            .map_err(|e| SourceError::io(e, Some(path.display().to_string())).with_backend(BACKEND))
    }

    fn describe(&self, folder: &str, file: &str) -> String {
        self.resolve(folder, file).map_or_else(
            |_| document_path(folder, file),
            |p| p.display().to_string(),
        )
    }
}
