use super::{DocumentStore, StoreError, StoreResult, DEFAULT_DOCUMENT_SUFFIX};
use crate::model::ResultDocument;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Store backed by a directory of `<id><suffix>` files.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    suffix: String,
    label: String,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let label = root.display().to_string();
        Self {
            root,
            suffix: DEFAULT_DOCUMENT_SUFFIX.to_string(),
            label,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> StoreResult<Self> {
        let suffix = suffix.into();
        if suffix.is_empty() {
            return Err(StoreError::InvalidSpec {
                spec: self.label,
                reason: "document suffix must not be empty".into(),
            });
        }
        self.suffix = suffix;
        Ok(self)
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}{}", id, self.suffix))
    }
}

impl DocumentStore for DirectoryStore {
    fn name(&self) -> &str {
        &self.label
    }

    fn list_identifiers(&self) -> StoreResult<BTreeSet<String>> {
        let entries =
            std::fs::read_dir(&self.root).map_err(|e| StoreError::io(&self.label, &e))?;

        let mut ids = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.label, &e))?;
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            match name.strip_suffix(self.suffix.as_str()) {
                Some("") => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        "skipping document without cluster name"
                    );
                }
                Some(id) => {
                    ids.insert(id.to_string());
                }
                None => {}
            }
        }
        Ok(ids)
    }

    fn get_document(&self, id: &str) -> StoreResult<ResultDocument> {
        let path = self.document_path(id);
        let raw = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound { id: id.to_string() },
            _ => StoreError::io(path.display(), &e),
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| StoreError::Parse {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        Ok(ResultDocument::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lists_only_suffixed_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("c1.json"), "{}").unwrap();
        fs::write(dir.path().join("c2.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join(".json"), "{}").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let store = DirectoryStore::new(dir.path());
        let ids: Vec<_> = store.list_identifiers().unwrap().into_iter().collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[test]
    fn custom_suffix() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("c1.report"), "{}").unwrap();
        fs::write(dir.path().join("c2.json"), "{}").unwrap();

        let store = DirectoryStore::new(dir.path())
            .with_suffix(".report")
            .unwrap();
        let ids: Vec<_> = store.list_identifiers().unwrap().into_iter().collect();
        assert_eq!(ids, vec!["c1"]);
    }

    #[test]
    fn empty_suffix_rejected() {
        let err = DirectoryStore::new("/tmp").with_suffix("").unwrap_err();
        assert!(matches!(err, StoreError::InvalidSpec { .. }));
    }

    #[test]
    fn missing_directory_fails_listing() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::new(dir.path().join("absent"));
        assert!(matches!(
            store.list_identifiers(),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn get_document_classifies_errors() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        fs::write(dir.path().join("good.json"), r#"{"report": {}}"#).unwrap();
        let store = DirectoryStore::new(dir.path());

        assert!(store.get_document("absent").unwrap_err().is_not_found());
        assert!(store.get_document("bad").unwrap_err().is_parse());
        let doc = store.get_document("good").unwrap();
        assert!(doc.as_value().get("report").is_some());
    }
}
