use super::{DocumentStore, StoreError, StoreResult};
use crate::model::ResultDocument;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory store holding raw document text, parsed on every fetch.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    name: String,
    docs: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: BTreeMap::new(),
        }
    }

    pub fn insert_json(&mut self, id: impl Into<String>, doc: &Value) {
        self.docs.insert(id.into(), doc.to_string());
    }

    /// Store raw text as-is, e.g. to simulate a corrupted download.
    pub fn insert_raw(&mut self, id: impl Into<String>, raw: impl Into<String>) {
        self.docs.insert(id.into(), raw.into());
    }

    pub fn with_json(mut self, id: impl Into<String>, doc: Value) -> Self {
        self.insert_json(id, &doc);
        self
    }
}

impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_identifiers(&self) -> StoreResult<BTreeSet<String>> {
        Ok(self.docs.keys().cloned().collect())
    }

    fn get_document(&self, id: &str) -> StoreResult<ResultDocument> {
        let raw = self
            .docs
            .get(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        serde_json::from_str::<Value>(raw)
            .map(ResultDocument::new)
            .map_err(|e| StoreError::Parse {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }
}
