//! Document store abstraction.
//!
//! The reconciliation core never touches a storage medium directly. It asks a
//! [`DocumentStore`] which entities exist and for the parsed document of one
//! entity at a time.
//!
//! Two adapters ship with the crate:
//!
//! - [`DirectoryStore`]: one `<cluster><suffix>` JSON file per entity
//! - [`MemoryStore`]: in-memory documents, used by tests and embedders

pub mod directory;
pub mod error;
pub mod memory;

use crate::model::ResultDocument;
use std::collections::BTreeSet;

pub use directory::DirectoryStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;

/// Suffix of result files written by the retrieval tooling.
pub const DEFAULT_DOCUMENT_SUFFIX: &str = ".json";

/// Source of result documents keyed by entity identifier.
///
/// Implementations must be safe to share across comparison workers.
pub trait DocumentStore: Send + Sync {
    /// Human-readable label used in reports.
    fn name(&self) -> &str;

    /// All entity identifiers held by this store.
    fn list_identifiers(&self) -> StoreResult<BTreeSet<String>>;

    /// Fetch and parse the document for one entity.
    ///
    /// # Returns
    ///
    /// - `Err(StoreError::NotFound)` if the entity is absent
    /// - `Err(StoreError::Parse)` if the document is malformed
    fn get_document(&self, id: &str) -> StoreResult<ResultDocument>;
}
