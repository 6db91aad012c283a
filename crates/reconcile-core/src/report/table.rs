//! Row layout of the tabular export.
//!
//! Blocks, in order: environment info (only when supplied), basic info,
//! redundant clusters of each store, comparison results. Blocks are separated
//! by one empty row.

use super::ComparisonReport;
use crate::model::Outcome;
use serde_json::Value;

pub type Row = Vec<String>;

pub const COMPARISON_HEADER: [&str; 9] = [
    "n",
    "cluster",
    "status",
    "same results",
    "eq.#hits",
    "hits1",
    "hits2",
    "same hits",
    "error",
];

pub fn rows(report: &ComparisonReport) -> Vec<Row> {
    let mut out = Vec::new();

    if let Some(env) = &report.environment {
        out.push(row(["External data pipeline components"]));
        for (component, fields) in env.components() {
            out.push(row(["", component.as_str()]));
            for (key, value) in fields {
                out.push(vec![
                    String::new(),
                    String::new(),
                    key.clone(),
                    render_value(value),
                ]);
            }
        }
        out.push(Vec::new());
    }

    let meta = &report.metadata;
    let tally = &report.tally;
    out.push(row(["Basic info about test results"]));
    out.push(row([
        "",
        "Tested on",
        &meta.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]));
    out.push(row(["", "1st store with results", &meta.left_store]));
    out.push(row(["", "2nd store with results", &meta.right_store]));
    out.push(row(["", "Results in 1st store", &meta.left_total.to_string()]));
    out.push(row(["", "Results in 2nd store", &meta.right_total.to_string()]));
    out.push(row([
        "",
        "Common clusters to compare",
        &meta.common_count.to_string(),
    ]));
    out.push(row(["", "Same results", &tally.same.to_string()]));
    out.push(row(["", "Different results", &tally.different.to_string()]));
    out.push(row(["", "Entities with errors", &tally.errors.to_string()]));
    out.push(Vec::new());

    redundant_block(&mut out, "Redundant clusters in 1st store", &report.left_only);
    out.push(Vec::new());
    redundant_block(&mut out, "Redundant clusters in 2nd store", &report.right_only);
    out.push(Vec::new());

    out.push(row(["Comparison results"]));
    out.push(row(COMPARISON_HEADER));
    for (i, v) in report.verdicts.iter().enumerate() {
        let mut r = vec![i.to_string(), v.entity.clone(), v.status().to_string()];
        match &v.outcome {
            Outcome::Ok(c) => {
                r.extend([
                    yes_no(c.same_results).to_string(),
                    yes_no(c.counts_equal).to_string(),
                    c.left_count.to_string(),
                    c.right_count.to_string(),
                    c.findings.as_str().to_string(),
                    String::new(),
                ]);
            }
            Outcome::Error { error } => {
                r.extend(std::iter::repeat(String::new()).take(5));
                r.push(error.clone());
            }
        }
        out.push(r);
    }

    out
}

fn redundant_block(out: &mut Vec<Row>, title: &str, ids: &[String]) {
    out.push(row([title]));
    out.push(row(["n", "cluster"]));
    for (i, id) in ids.iter().enumerate() {
        out.push(vec![i.to_string(), id.clone()]);
    }
}

fn row<const N: usize>(cells: [&str; N]) -> Row {
    cells.iter().map(|c| c.to_string()).collect()
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

fn render_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
