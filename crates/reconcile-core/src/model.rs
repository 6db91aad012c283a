//! Data model shared by the reconciler, comparator and report assembler.

use crate::errors::{Side, StructuralError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Identifier of one analyzed cluster. Join key between the two stores.
pub type EntityId = String;

/// A deserialized result document for one cluster.
///
/// The document is opaque apart from the two fields the comparator reads:
/// `report.meta.count` and `report.data[*].rule_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultDocument(Value);

impl ResultDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Rule hit counter exposed in the report metadata.
    pub fn hit_count(&self, side: Side) -> Result<i64, StructuralError> {
        let count = self
            .0
            .get("report")
            .and_then(|r| r.get("meta"))
            .and_then(|m| m.get("count"))
            .ok_or_else(|| StructuralError::missing(side, "report.meta.count"))?;

        count.as_i64().ok_or_else(|| {
            StructuralError::new(
                side,
                "report.meta.count",
                format!("expected integer, found {}", json_kind(count)),
            )
        })
    }

    /// Rule identifiers of all reported findings, in document order.
    ///
    /// Duplicates are kept.
    pub fn finding_ids(&self, side: Side) -> Result<Vec<&str>, StructuralError> {
        let data = self
            .0
            .get("report")
            .and_then(|r| r.get("data"))
            .ok_or_else(|| StructuralError::missing(side, "report.data"))?;

        let findings = data.as_array().ok_or_else(|| {
            StructuralError::new(
                side,
                "report.data",
                format!("expected array, found {}", json_kind(data)),
            )
        })?;

        findings
            .iter()
            .enumerate()
            .map(|(i, finding)| {
                finding
                    .get("rule_id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        StructuralError::new(
                            side,
                            format!("report.data[{i}].rule_id"),
                            "missing or not a string",
                        )
                    })
            })
            .collect()
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Outcome of the finding-set tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingsVerdict {
    /// Every left finding has a right finding with the same rule id.
    Equivalent,
    /// At least one left finding has no counterpart on the right.
    Divergent,
    /// Tier skipped because the hit counts already differ.
    Unknown,
}

impl FindingsVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equivalent => "yes",
            Self::Divergent => "no",
            Self::Unknown => "unknown",
        }
    }
}

/// Successful comparison of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub counts_equal: bool,
    pub left_count: i64,
    pub right_count: i64,
    pub findings: FindingsVerdict,
    pub same_results: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok(Comparison),
    Error { error: String },
}

/// Per-entity verdict produced exactly once by the comparator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub entity: EntityId,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl VerdictRecord {
    pub fn ok(entity: impl Into<EntityId>, comparison: Comparison) -> Self {
        Self {
            entity: entity.into(),
            outcome: Outcome::Ok(comparison),
        }
    }

    pub fn error(entity: impl Into<EntityId>, error: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            outcome: Outcome::Error {
                error: error.into(),
            },
        }
    }

    pub fn status(&self) -> &'static str {
        match self.outcome {
            Outcome::Ok(_) => "ok",
            Outcome::Error { .. } => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error { .. })
    }

    pub fn comparison(&self) -> Option<&Comparison> {
        match &self.outcome {
            Outcome::Ok(c) => Some(c),
            Outcome::Error { .. } => None,
        }
    }

    /// `Some(true)` when both snapshots agree, `None` for error verdicts.
    pub fn same_results(&self) -> Option<bool> {
        self.comparison().map(|c| c.same_results)
    }
}

/// Descriptive fields of pipeline components, keyed by component name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentInfo(pub BTreeMap<String, BTreeMap<String, Value>>);

impl EnvironmentInfo {
    /// Accept either the bare component mapping or an `/info` payload that
    /// wraps it under `info`.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let inner = match value {
            Value::Object(mut map) if map.contains_key("info") => {
                map.remove("info").unwrap_or(Value::Null)
            }
            other => other,
        };
        serde_json::from_value(inner).map(Self)
    }

    pub fn components(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Value>)> {
        self.0.iter()
    }
}
