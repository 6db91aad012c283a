//! Run pipeline: list both stores, partition, compare each common entity,
//! assemble the report.

use crate::compare::compare_entity;
use crate::config::DEFAULT_PARALLEL;
use crate::errors::{ConfigurationError, ReconcileError, ReconcileResult};
use crate::model::{EnvironmentInfo, VerdictRecord};
use crate::partition::{partition, SetPartition};
use crate::report::{assemble, ComparisonReport};
use crate::store::DocumentStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Clone)]
pub struct Reconciler {
    left: Arc<dyn DocumentStore>,
    right: Arc<dyn DocumentStore>,
    parallel: usize,
}

impl Reconciler {
    pub fn new(left: Arc<dyn DocumentStore>, right: Arc<dyn DocumentStore>) -> Self {
        Self {
            left,
            right,
            parallel: DEFAULT_PARALLEL,
        }
    }

    /// Upper bound on concurrently running comparisons in [`Self::run_parallel`].
    pub fn with_parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn partition(&self) -> ReconcileResult<SetPartition> {
        let left_ids = list(self.left.as_ref())?;
        let right_ids = list(self.right.as_ref())?;
        let p = partition(&left_ids, &right_ids)?;
        tracing::info!(
            left = self.left.name(),
            right = self.right.name(),
            common = p.common.len(),
            left_only = p.left_only.len(),
            right_only = p.right_only.len(),
            "partitioned stores"
        );
        if !p.is_aligned() {
            tracing::warn!(
                left_only = ?p.left_only,
                right_only = ?p.right_only,
                "stores hold different entity sets; redundant entities are not compared"
            );
        }
        Ok(p)
    }

    /// Compare all common entities one after another.
    pub fn run(&self, environment: Option<EnvironmentInfo>) -> ReconcileResult<ComparisonReport> {
        let p = self.partition()?;
        let verdicts = p
            .common
            .iter()
            .map(|id| {
                tracing::debug!(entity = %id, "comparing");
                compare_entity(id, self.left.as_ref(), self.right.as_ref())
            })
            .collect();
        self.finish(&p, verdicts, environment)
    }

    /// Compare common entities on a bounded pool of blocking workers.
    ///
    /// Produces the same report as [`Self::run`]; verdicts are re-sorted by
    /// entity before assembly. A worker that panics yields an error verdict for
    /// its entity only.
    pub async fn run_parallel(
        &self,
        environment: Option<EnvironmentInfo>,
    ) -> ReconcileResult<ComparisonReport> {
        if self.parallel == 0 {
            return Err(ConfigurationError::new("parallel", "at least 1 worker", "0").into());
        }
        let p = self.partition()?;

        let sem = Arc::new(Semaphore::new(self.parallel));
        let mut join_set = JoinSet::new();
        let mut pending = HashMap::new();

        for id in &p.common {
            let permit = sem
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| ReconcileError::Worker(e.to_string()))?;
            let left = Arc::clone(&self.left);
            let right = Arc::clone(&self.right);
            let entity = id.clone();
            let handle = join_set.spawn_blocking(move || {
                let _permit = permit;
                tracing::debug!(entity = %entity, "comparing");
                compare_entity(&entity, left.as_ref(), right.as_ref())
            });
            pending.insert(handle.id(), id.clone());
        }

        let mut verdicts = Vec::with_capacity(p.common.len());
        while let Some(res) = join_set.join_next_with_id().await {
            match res {
                Ok((task, verdict)) => {
                    pending.remove(&task);
                    verdicts.push(verdict);
                }
                Err(e) => {
                    let Some(entity) = pending.remove(&e.id()) else {
                        return Err(ReconcileError::Worker(e.to_string()));
                    };
                    tracing::warn!(entity = %entity, error = %e, "comparison worker failed");
                    verdicts.push(VerdictRecord::error(
                        entity,
                        format!("comparison worker failed: {e}"),
                    ));
                }
            }
        }

        verdicts.sort_by(|a, b| a.entity.cmp(&b.entity));
        self.finish(&p, verdicts, environment)
    }

    fn finish(
        &self,
        p: &SetPartition,
        verdicts: Vec<VerdictRecord>,
        environment: Option<EnvironmentInfo>,
    ) -> ReconcileResult<ComparisonReport> {
        let report = assemble(
            p,
            verdicts,
            environment,
            (self.left.name(), self.right.name()),
        )?;
        tracing::info!(
            compared = report.tally.compared,
            same = report.tally.same,
            different = report.tally.different,
            errors = report.tally.errors,
            "comparison finished"
        );
        Ok(report)
    }
}

fn list(store: &dyn DocumentStore) -> ReconcileResult<std::collections::BTreeSet<String>> {
    store.list_identifiers().map_err(|source| ReconcileError::Store {
        store: store.name().to_string(),
        source,
    })
}
