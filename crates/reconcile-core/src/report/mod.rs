pub mod csv;
pub mod json;
pub mod table;

use crate::errors::ConfigurationError;
use crate::model::{EntityId, EnvironmentInfo, Outcome, VerdictRecord};
use crate::partition::SetPartition;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Basic facts about one comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    pub generated_at: DateTime<Utc>,
    pub left_store: String,
    pub right_store: String,
    pub left_total: usize,
    pub right_total: usize,
    pub common_count: usize,
}

/// Run-wide counters, built from the verdicts of a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTally {
    pub compared: usize,
    pub same: usize,
    pub different: usize,
    pub errors: usize,
}

impl RunTally {
    pub fn record(&mut self, verdict: &VerdictRecord) {
        self.compared += 1;
        match &verdict.outcome {
            Outcome::Ok(c) if c.same_results => self.same += 1,
            Outcome::Ok(_) => self.different += 1,
            Outcome::Error { .. } => self.errors += 1,
        }
    }

    pub fn from_verdicts<'a>(verdicts: impl IntoIterator<Item = &'a VerdictRecord>) -> Self {
        let mut tally = Self::default();
        for v in verdicts {
            tally.record(v);
        }
        tally
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentInfo>,
    pub metadata: RunMetadata,
    pub left_only: Vec<EntityId>,
    pub right_only: Vec<EntityId>,
    pub verdicts: Vec<VerdictRecord>,
    pub tally: RunTally,
}

impl ComparisonReport {
    /// No differing entities, no failed entities, no redundant results.
    pub fn is_clean(&self) -> bool {
        self.tally.different == 0
            && self.tally.errors == 0
            && self.left_only.is_empty()
            && self.right_only.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.verdicts.iter().filter_map(|v| match &v.outcome {
            Outcome::Error { error } => Some((v.entity.as_str(), error.as_str())),
            Outcome::Ok(_) => None,
        })
    }
}

/// Build the report, stamping it with the current wall-clock time.
pub fn assemble(
    partition: &SetPartition,
    verdicts: Vec<VerdictRecord>,
    environment: Option<EnvironmentInfo>,
    store_names: (&str, &str),
) -> Result<ComparisonReport, ConfigurationError> {
    assemble_at(partition, verdicts, environment, store_names, Utc::now())
}

pub fn assemble_at(
    partition: &SetPartition,
    verdicts: Vec<VerdictRecord>,
    environment: Option<EnvironmentInfo>,
    (left_store, right_store): (&str, &str),
    generated_at: DateTime<Utc>,
) -> Result<ComparisonReport, ConfigurationError> {
    if left_store.is_empty() {
        return Err(ConfigurationError::new(
            "store_names.left",
            "a non-empty store name",
            "\"\"",
        ));
    }
    if right_store.is_empty() {
        return Err(ConfigurationError::new(
            "store_names.right",
            "a non-empty store name",
            "\"\"",
        ));
    }
    check_verdict_order(partition, &verdicts)?;

    let tally = RunTally::from_verdicts(&verdicts);

    Ok(ComparisonReport {
        environment,
        metadata: RunMetadata {
            generated_at,
            left_store: left_store.to_string(),
            right_store: right_store.to_string(),
            left_total: partition.left_total,
            right_total: partition.right_total,
            common_count: partition.common.len(),
        },
        left_only: partition.left_only.clone(),
        right_only: partition.right_only.clone(),
        verdicts,
        tally,
    })
}

fn check_verdict_order(
    partition: &SetPartition,
    verdicts: &[VerdictRecord],
) -> Result<(), ConfigurationError> {
    if verdicts.len() != partition.common.len() {
        return Err(ConfigurationError::new(
            "verdicts",
            format!("{} verdicts, one per common entity", partition.common.len()),
            format!("{} verdicts", verdicts.len()),
        ));
    }
    let mismatch = partition
        .common
        .iter()
        .zip(verdicts)
        .enumerate()
        .find(|(_, (id, v))| **id != v.entity);
    if let Some((index, (expected, v))) = mismatch {
        return Err(ConfigurationError::new(
            "verdicts",
            format!("entity '{expected}' at position {index}"),
            format!("'{}'", v.entity),
        ));
    }
    Ok(())
}
