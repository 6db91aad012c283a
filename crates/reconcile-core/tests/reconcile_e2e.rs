use reconcile_core::report::csv::write_csv;
use reconcile_core::report::table::{self, COMPARISON_HEADER};
use reconcile_core::{DirectoryStore, DocumentStore, FindingsVerdict, Reconciler};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn cluster_result(count: i64, rules: &[&str]) -> Value {
    let data: Vec<_> = rules
        .iter()
        .map(|r| json!({"rule_id": r, "component": "ccx_rules_ocp.external", "key": "KEY"}))
        .collect();
    json!({
        "report": {"meta": {"count": count, "last_checked_at": "2021-06-01T10:00:00Z"}, "data": data},
        "status": "ok"
    })
}

fn write_result(dir: &Path, cluster: &str, doc: &Value) {
    fs::write(
        dir.join(format!("{cluster}.json")),
        serde_json::to_string_pretty(doc).unwrap(),
    )
    .unwrap();
}

fn reconciler(d1: &Path, d2: &Path) -> Reconciler {
    let left: Arc<dyn DocumentStore> = Arc::new(DirectoryStore::new(d1));
    let right: Arc<dyn DocumentStore> = Arc::new(DirectoryStore::new(d2));
    Reconciler::new(left, right)
}

#[test]
fn overlapping_directories_with_identical_results() {
    let d1 = tempdir().unwrap();
    let d2 = tempdir().unwrap();
    for c in ["A", "B", "C"] {
        write_result(d1.path(), c, &cluster_result(5, &["r1", "r2"]));
    }
    for c in ["B", "C", "D"] {
        write_result(d2.path(), c, &cluster_result(5, &["r2", "r1"]));
    }

    let report = reconciler(d1.path(), d2.path()).run(None).unwrap();

    assert_eq!(report.left_only, vec!["A"]);
    assert_eq!(report.right_only, vec!["D"]);
    let ids: Vec<_> = report.verdicts.iter().map(|v| v.entity.as_str()).collect();
    assert_eq!(ids, vec!["B", "C"]);
    assert!(report
        .verdicts
        .iter()
        .all(|v| v.same_results() == Some(true)));
    assert_eq!(report.metadata.common_count, 2);
}

#[test]
fn different_hit_counts() {
    let d1 = tempdir().unwrap();
    let d2 = tempdir().unwrap();
    write_result(d1.path(), "B", &cluster_result(3, &["r1", "r2", "r3"]));
    write_result(d2.path(), "B", &cluster_result(5, &["r1", "r2", "r3", "r4", "r5"]));

    let report = reconciler(d1.path(), d2.path()).run(None).unwrap();
    let c = report.verdicts[0].comparison().unwrap();
    assert!(!c.counts_equal);
    assert!(!c.same_results);
    assert_eq!(c.findings, FindingsVerdict::Unknown);
}

#[test]
fn malformed_document_fails_only_its_entity() {
    let d1 = tempdir().unwrap();
    let d2 = tempdir().unwrap();
    for c in ["c1", "c2", "c3"] {
        write_result(d1.path(), c, &cluster_result(1, &["r1"]));
    }
    write_result(d2.path(), "c1", &cluster_result(1, &["r1"]));
    write_result(d2.path(), "c2", &json!({"report": {"data": []}, "status": "ok"}));
    write_result(d2.path(), "c3", &cluster_result(1, &["r1"]));

    let report = reconciler(d1.path(), d2.path()).run(None).unwrap();
    let statuses: Vec<_> = report.verdicts.iter().map(|v| v.status()).collect();
    assert_eq!(statuses, vec!["ok", "error", "ok"]);
    assert_eq!(report.tally.errors, 1);
    assert_eq!(report.tally.same, 2);
}

#[tokio::test]
async fn exported_comparison_block_has_one_row_per_common_entity() {
    let d1 = tempdir().unwrap();
    let d2 = tempdir().unwrap();
    let clusters = ["f0", "a1", "c7", "b2", "e9"];
    for c in clusters {
        write_result(d1.path(), c, &cluster_result(2, &["r1", "r2"]));
        write_result(d2.path(), c, &cluster_result(2, &["r1", "r3"]));
    }
    write_result(d1.path(), "only-left", &cluster_result(0, &[]));

    let report = reconciler(d1.path(), d2.path())
        .with_parallel(3)
        .run_parallel(None)
        .await
        .unwrap();

    let rows = table::rows(&report);
    let header = rows
        .iter()
        .position(|r| *r == COMPARISON_HEADER.to_vec())
        .unwrap();
    let block = &rows[header + 1..];
    assert_eq!(block.len(), clusters.len());
    let ids: Vec<_> = block.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(ids, vec!["a1", "b2", "c7", "e9", "f0"]);
    assert!(block.iter().all(|r| r[7] == "no"));

    let mut buf = Vec::new();
    write_csv(&report, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("\"0\",\"only-left\""));
}
