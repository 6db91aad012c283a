//! Three-way split of entity identifiers between two stores.

use crate::errors::ConfigurationError;
use crate::model::EntityId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Result of partitioning two identifier sets.
///
/// All three lists are in ascending lexicographic order and pairwise disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetPartition {
    pub common: Vec<EntityId>,
    pub left_only: Vec<EntityId>,
    pub right_only: Vec<EntityId>,
    pub left_total: usize,
    pub right_total: usize,
}

impl SetPartition {
    pub fn is_aligned(&self) -> bool {
        self.left_only.is_empty() && self.right_only.is_empty()
    }
}

/// Split `left` and `right` into common, left-only and right-only identifiers.
pub fn partition(
    left: &BTreeSet<EntityId>,
    right: &BTreeSet<EntityId>,
) -> Result<SetPartition, ConfigurationError> {
    check_ids("left", left)?;
    check_ids("right", right)?;

    Ok(SetPartition {
        common: left.intersection(right).cloned().collect(),
        left_only: left.difference(right).cloned().collect(),
        right_only: right.difference(left).cloned().collect(),
        left_total: left.len(),
        right_total: right.len(),
    })
}

fn check_ids(argument: &str, ids: &BTreeSet<EntityId>) -> Result<(), ConfigurationError> {
    if ids.contains("") {
        return Err(ConfigurationError::new(
            argument,
            "non-empty entity identifiers",
            "an empty identifier",
        ));
    }
    Ok(())
}
