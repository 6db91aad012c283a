//! Reconciliation of two snapshots of per-cluster rule results.
//!
//! A [`Reconciler`] lists the entities of two [`DocumentStore`]s, partitions
//! them into common, left-only and right-only identifiers, compares every
//! common entity and assembles a [`ComparisonReport`] ready for export.

pub mod compare;
pub mod config;
pub mod engine;
pub mod errors;
pub mod model;
pub mod partition;
pub mod report;
pub mod store;

pub use compare::{compare, compare_entity};
pub use config::{load_config, load_environment_info, ExportFormat, ReconcileConfig};
pub use engine::Reconciler;
pub use errors::{
    ConfigError, ConfigurationError, EntityError, ReconcileError, ReconcileResult, Side,
    StructuralError,
};
pub use model::{
    Comparison, EntityId, EnvironmentInfo, FindingsVerdict, Outcome, ResultDocument, VerdictRecord,
};
pub use partition::{partition, SetPartition};
pub use report::{assemble, ComparisonReport, RunMetadata, RunTally};
pub use store::{DirectoryStore, DocumentStore, MemoryStore, StoreError, StoreResult};
