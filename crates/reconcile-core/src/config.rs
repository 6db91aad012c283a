use crate::errors::ConfigError;
use crate::model::EnvironmentInfo;
use crate::store::DEFAULT_DOCUMENT_SUFFIX;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_PARALLEL: usize = 4;
pub const DEFAULT_EXPORT_PATH: &str = "report.csv";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    #[serde(default = "default_export_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
            format: ExportFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconcileConfig {
    pub version: u32,
    /// Worker pool size for per-entity comparisons.
    #[serde(default = "default_parallel")]
    pub parallel: usize,
    #[serde(default = "default_suffix")]
    pub document_suffix: String,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub environment_info: Option<PathBuf>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            parallel: DEFAULT_PARALLEL,
            document_suffix: default_suffix(),
            export: ExportConfig::default(),
            environment_info: None,
        }
    }
}

impl ReconcileConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError(format!(
                "unsupported config version {} (supported: {})",
                self.version, SUPPORTED_CONFIG_VERSION
            )));
        }
        if self.parallel == 0 {
            return Err(ConfigError("parallel must be at least 1".into()));
        }
        if self.document_suffix.is_empty() {
            return Err(ConfigError("document_suffix must not be empty".into()));
        }
        Ok(())
    }
}

fn default_parallel() -> usize {
    DEFAULT_PARALLEL
}

fn default_suffix() -> String {
    DEFAULT_DOCUMENT_SUFFIX.to_string()
}

fn default_export_path() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_PATH)
}

pub fn load_config(path: &Path) -> Result<ReconcileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    let cfg: ReconcileConfig = serde_yaml::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Read pipeline component info exported from the `/info` endpoint.
pub fn load_environment_info(path: &Path) -> Result<EnvironmentInfo, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ConfigError(format!(
            "failed to read environment info {}: {}",
            path.display(),
            e
        ))
    })?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse environment info: {}", e)))?;
    EnvironmentInfo::from_value(value)
        .map_err(|e| ConfigError(format!("invalid environment info: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_fill_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reconcile.yaml");
        fs::write(&path, "version: 1\n").unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg, ReconcileConfig::default());
    }

    #[test]
    fn full_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reconcile.yaml");
        fs::write(
            &path,
            r#"
version: 1
parallel: 8
document_suffix: ".report.json"
export:
  path: out/diff.json
  format: json
environment_info: info.json
"#,
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.parallel, 8);
        assert_eq!(cfg.document_suffix, ".report.json");
        assert_eq!(cfg.export.format, ExportFormat::Json);
        assert_eq!(cfg.export.path, PathBuf::from("out/diff.json"));
        assert_eq!(cfg.environment_info, Some(PathBuf::from("info.json")));
    }

    #[test]
    fn rejects_invalid_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reconcile.yaml");

        for body in [
            "version: 2\n",
            "version: 1\nparallel: 0\n",
            "version: 1\ndocument_suffix: \"\"\n",
            "version: 1\nunknown: true\n",
        ] {
            fs::write(&path, body).unwrap();
            assert!(load_config(&path).is_err(), "accepted: {body}");
        }
    }

    #[test]
    fn environment_info_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("info.json");
        fs::write(
            &path,
            r#"{"info": {"ContentService": {"version": "0.1", "status": "ok"}}, "status": "ok"}"#,
        )
        .unwrap();
        let env = load_environment_info(&path).unwrap();
        let (name, fields) = env.components().next().unwrap();
        assert_eq!(name, "ContentService");
        assert_eq!(fields.len(), 2);

        fs::write(&path, r#"{"Aggregator": "not a mapping"}"#).unwrap();
        assert!(load_environment_info(&path).is_err());
    }
}
