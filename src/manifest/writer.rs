use std::io::Write;
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::manifest::ManifestDocument;

/// Persists a `ManifestDocument` to disk.
///
/// The write goes through a temporary file in the target's parent directory
/// followed by a rename, so an interrupted run never leaves a truncated
/// manifest behind.
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    /// Whether an existing target file may be replaced. Scaffolding reruns
    /// regenerate the manifest wholesale, so this defaults to `true`.
    pub overwrite: bool,
}

impl Default for ManifestWriter {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

impl ManifestWriter {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }

    /// Serializes `doc` and writes it to `path`.
    ///
    /// # Errors
    /// * `Error::WriteFailed` if the target exists and overwrite is off, if
    ///   the parent directory is missing or not writable, or if the rename
    ///   fails
    pub fn write<P: AsRef<Path>>(&self, doc: &ManifestDocument, path: P) -> Result<()> {
        let path = path.as_ref();

        if path.exists() && !self.overwrite {
            return Err(Error::WriteFailed {
                path: path.display().to_string(),
                detail: "target already exists and overwrite is not permitted".to_string(),
            });
        }

        let parent = path.parent().ok_or_else(|| Error::WriteFailed {
            path: path.display().to_string(),
            detail: "target path has no parent directory".to_string(),
        })?;

        let write_failed = |detail: String| Error::WriteFailed {
            path: path.display().to_string(),
            detail,
        };

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| write_failed(e.to_string()))?;
        tmp.write_all(doc.to_json_string().as_bytes())
            .map_err(|e| write_failed(e.to_string()))?;
        tmp.persist(path).map_err(|e| write_failed(e.to_string()))?;

        debug!("Wrote manifest to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_doc() -> ManifestDocument {
        let mut doc = ManifestDocument::new();
        doc.set("name", json!("acme/blog"));
        doc.set("minimum-stability", json!("stable"));
        doc
    }

    #[test]
    fn writes_pretty_json_with_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("composer.json");

        ManifestWriter::default().write(&sample_doc(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("{\n"));
        assert!(contents.ends_with("}\n"));
        assert!(contents.contains("\"acme/blog\""));
    }

    #[test]
    fn refuses_existing_target_without_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("composer.json");
        std::fs::write(&path, "{}").unwrap();

        let result = ManifestWriter::new(false).write(&sample_doc(), &path);
        assert!(matches!(result, Err(Error::WriteFailed { .. })));
        // The existing file is untouched.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn overwrites_existing_target_by_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("composer.json");
        std::fs::write(&path, "old contents").unwrap();

        ManifestWriter::default().write(&sample_doc(), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("acme/blog"));
    }

    #[test]
    fn fails_when_parent_directory_is_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("composer.json");

        let result = ManifestWriter::default().write(&sample_doc(), &path);
        assert!(matches!(result, Err(Error::WriteFailed { .. })));
    }

    #[test]
    fn failed_persist_leaves_target_intact_and_no_truncated_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("composer.json");
        // A non-empty directory at the target path makes the final rename fail.
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("inner.txt"), "kept").unwrap();

        let result = ManifestWriter::default().write(&sample_doc(), &path);
        assert!(matches!(result, Err(Error::WriteFailed { .. })));

        // The pre-existing target survives untouched and the temporary file
        // is cleaned up, so nothing truncated is left behind.
        assert_eq!(std::fs::read_to_string(path.join("inner.txt")).unwrap(), "kept");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn repeated_writes_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("composer.json");
        let writer = ManifestWriter::default();

        writer.write(&sample_doc(), &path).unwrap();
        let first = std::fs::read(&path).unwrap();
        writer.write(&sample_doc(), &path).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }
}
