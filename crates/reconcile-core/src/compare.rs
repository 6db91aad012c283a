//! Two-tier equivalence check for one entity present in both stores.
//!
//! Tier 1 compares the rule hit counters from the report metadata. Different
//! counters prove the results differ, so tier 2 is skipped and the finding
//! verdict stays [`FindingsVerdict::Unknown`].
//!
//! Tier 2 runs only on equal counters and checks that every rule id reported
//! on the left also appears on the right. This is a containment check, not set
//! equality: extra rule ids on the right are not detected unless they change
//! the counter. Multiplicity is ignored.

use crate::errors::{EntityError, Side};
use crate::model::{Comparison, FindingsVerdict, ResultDocument, VerdictRecord};
use crate::store::DocumentStore;
use std::collections::HashSet;

/// Compare two parsed documents for the same entity.
///
/// Structural problems in either document turn into an error verdict.
pub fn compare(id: &str, left: &ResultDocument, right: &ResultDocument) -> VerdictRecord {
    match compare_documents(left, right) {
        Ok(comparison) => VerdictRecord::ok(id, comparison),
        Err(e) => error_verdict(id, &e),
    }
}

/// Fetch both documents and compare them.
///
/// Adapter failures on either side are recorded in the verdict and never
/// propagate.
pub fn compare_entity(
    id: &str,
    left: &dyn DocumentStore,
    right: &dyn DocumentStore,
) -> VerdictRecord {
    let docs = left
        .get_document(id)
        .map_err(|e| EntityError::adapter(Side::Left, e))
        .and_then(|l| {
            right
                .get_document(id)
                .map(|r| (l, r))
                .map_err(|e| EntityError::adapter(Side::Right, e))
        });

    match docs {
        Ok((l, r)) => compare(id, &l, &r),
        Err(e) => error_verdict(id, &e),
    }
}

fn error_verdict(id: &str, err: &EntityError) -> VerdictRecord {
    tracing::warn!(entity = id, error = %err, "comparison failed");
    VerdictRecord::error(id, err.to_string())
}

fn compare_documents(
    left: &ResultDocument,
    right: &ResultDocument,
) -> Result<Comparison, EntityError> {
    let left_count = left.hit_count(Side::Left)?;
    let right_count = right.hit_count(Side::Right)?;

    if left_count != right_count {
        return Ok(Comparison {
            counts_equal: false,
            left_count,
            right_count,
            findings: FindingsVerdict::Unknown,
            same_results: false,
        });
    }

    let left_ids = left.finding_ids(Side::Left)?;
    let covered = if left_ids.is_empty() {
        true
    } else {
        let right_ids: HashSet<&str> = right.finding_ids(Side::Right)?.into_iter().collect();
        left_ids.iter().all(|id| right_ids.contains(id))
    };

    let findings = if covered {
        FindingsVerdict::Equivalent
    } else {
        FindingsVerdict::Divergent
    };

    Ok(Comparison {
        counts_equal: true,
        left_count,
        right_count,
        findings,
        same_results: findings == FindingsVerdict::Equivalent,
    })
}
