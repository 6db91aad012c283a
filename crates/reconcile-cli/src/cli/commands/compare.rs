use super::super::args::CompareArgs;
use crate::exit_codes;
use anyhow::Context;
use reconcile_core::report::{csv::write_csv_file, json::write_json};
use reconcile_core::{
    load_config, load_environment_info, ComparisonReport, DirectoryStore, DocumentStore,
    ExportFormat, ReconcileConfig, Reconciler,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Effective settings after layering flags over the config file.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    parallel: usize,
    suffix: String,
    export: PathBuf,
    format: ExportFormat,
    env_info: Option<PathBuf>,
}

impl Settings {
    fn resolve(args: &CompareArgs, cfg: ReconcileConfig) -> Self {
        Self {
            parallel: args.parallel.unwrap_or(cfg.parallel),
            suffix: args.suffix.clone().unwrap_or(cfg.document_suffix),
            export: args.export.clone().unwrap_or(cfg.export.path),
            format: args.format.map(Into::into).unwrap_or(cfg.export.format),
            env_info: args.env_info.clone().or(cfg.environment_info),
        }
    }
}

pub async fn run(args: CompareArgs) -> anyhow::Result<i32> {
    let cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => ReconcileConfig::default(),
    };
    let settings = Settings::resolve(&args, cfg);
    tracing::debug!(?settings, "compare settings");

    let left: Arc<dyn DocumentStore> =
        Arc::new(DirectoryStore::new(&args.left).with_suffix(settings.suffix.as_str())?);
    let right: Arc<dyn DocumentStore> =
        Arc::new(DirectoryStore::new(&args.right).with_suffix(settings.suffix.as_str())?);

    let environment = settings
        .env_info
        .as_deref()
        .map(load_environment_info)
        .transpose()?;

    let report = Reconciler::new(left, right)
        .with_parallel(settings.parallel)
        .run_parallel(environment)
        .await?;

    match settings.format {
        ExportFormat::Csv => write_csv_file(&report, &settings.export),
        ExportFormat::Json => write_json(&report, &settings.export),
    }
    .with_context(|| format!("failed to export report to {}", settings.export.display()))?;

    display_errors(&report);
    eprintln!(
        "compared {} clusters: {} same, {} different, {} errors; report written to {}",
        report.tally.compared,
        report.tally.same,
        report.tally.different,
        report.tally.errors,
        settings.export.display()
    );

    if args.fail_on_diff && !report.is_clean() {
        return Ok(exit_codes::DIFFERENCES_FOUND);
    }
    Ok(exit_codes::SUCCESS)
}

fn display_errors(report: &ComparisonReport) {
    let rule = "-".repeat(60);
    eprintln!("{rule}");
    if report.tally.errors == 0 {
        eprintln!("No errors found");
    } else {
        eprintln!("Errors detected during results processing");
        for (cluster, error) in report.errors() {
            eprintln!("{cluster} {error}");
        }
    }
    eprintln!("{rule}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;

    fn args() -> CompareArgs {
        CompareArgs {
            left: "d1".into(),
            right: "d2".into(),
            export: None,
            format: None,
            env_info: None,
            parallel: None,
            suffix: None,
            config: None,
            fail_on_diff: false,
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let cfg = ReconcileConfig {
            parallel: 9,
            environment_info: Some("info.json".into()),
            ..ReconcileConfig::default()
        };
        let s = Settings::resolve(&args(), cfg);
        assert_eq!(s.parallel, 9);
        assert_eq!(s.suffix, ".json");
        assert_eq!(s.export, PathBuf::from("report.csv"));
        assert_eq!(s.format, ExportFormat::Csv);
        assert_eq!(s.env_info, Some(PathBuf::from("info.json")));
    }

    #[test]
    fn flags_override_config() {
        let mut a = args();
        a.parallel = Some(1);
        a.format = Some(OutputFormat::Json);
        a.export = Some("out.json".into());
        a.suffix = Some(".res".into());
        let s = Settings::resolve(&a, ReconcileConfig::default());
        assert_eq!(s.parallel, 1);
        assert_eq!(s.format, ExportFormat::Json);
        assert_eq!(s.export, PathBuf::from("out.json"));
        assert_eq!(s.suffix, ".res");
    }
}
