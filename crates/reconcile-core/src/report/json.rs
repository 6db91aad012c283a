use super::ComparisonReport;
use std::path::Path;

pub fn write_json(report: &ComparisonReport, out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, serde_json::to_string_pretty(report)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VerdictRecord;
    use crate::partition::partition;
    use crate::report::assemble;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    #[test]
    fn writes_pretty_report() {
        let ids: BTreeSet<String> = ["c1".to_string()].into_iter().collect();
        let p = partition(&ids, &ids).unwrap();
        let verdicts = vec![VerdictRecord::error("c1", "boom")];
        let report = assemble(&p, verdicts, None, ("l", "r")).unwrap();

        let dir = tempdir().unwrap();
        let out = dir.path().join("report.json");
        write_json(&report, &out).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(v["metadata"]["left_store"], "l");
        assert_eq!(v["tally"]["errors"], 1);
        assert_eq!(v["verdicts"][0]["status"], "error");
        assert!(v.get("environment").is_none());
    }
}
