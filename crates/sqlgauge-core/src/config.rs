use crate::errors::ConfigError;
use crate::model::StatementKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default = "default_version", rename = "configVersion", alias = "version")]
    pub version: u32,
    pub suite: String,
    pub model: String,
    /// Provisioned reference database. The harness opens transactions
    /// against it but never commits statements under test.
    pub db: PathBuf,
    /// Corpus of `{question, sql}` pairs.
    pub corpus: PathBuf,
    #[serde(default, skip_serializing_if = "is_default_settings")]
    pub settings: Settings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    /// Per-kind subset shares; defaults to the read-dominant skew.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratios: Option<BTreeMap<StatementKind, f64>>,
    /// Similarity scorer: "matching_blocks" (default) or "levenshtein".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scorer: Option<String>,
    /// When true, reference-corpus defects stay in the execution-accuracy
    /// denominator instead of being excluded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_reference_defects: Option<bool>,
    /// OpenAI-compatible endpoint for the generator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn is_default_settings(s: &Settings) -> bool {
    s == &Settings::default()
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

pub fn load_config(path: &Path) -> Result<EvalConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;

    let mut ignored_keys = std::collections::HashSet::new();
    let deserializer = serde_yaml::Deserializer::from_str(&raw);
    let cfg: EvalConfig = serde_ignored::deserialize(deserializer, |path| {
        ignored_keys.insert(path.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    if !ignored_keys.is_empty() {
        tracing::warn!(keys = ?ignored_keys, "ignored unknown config fields");
    }

    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }

    if let Some(ratios) = &cfg.settings.ratios {
        for (kind, ratio) in ratios {
            if !(0.0..=1.0).contains(ratio) {
                return Err(ConfigError(format!(
                    "ratio for {} must be in [0, 1], got {}",
                    kind.as_str(),
                    ratio
                )));
            }
        }
    }

    Ok(cfg)
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(
        path,
        r#"configVersion: 1
suite: sakila
model: deepseek-chat
db: .eval/sakila.db
corpus: .eval/q2sql_pairs.json
settings:
  target_count: 25
  seed: 42
  timeout_seconds: 30
  scorer: matching_blocks
  ratios:
    select: 0.50
    insert: 0.17
    update: 0.17
    delete: 0.16
"#,
    )
    .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqlgauge.yaml");
        write_sample_config(&path).unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.suite, "sakila");
        assert_eq!(cfg.settings.target_count, Some(25));
        assert_eq!(cfg.settings.seed, Some(42));
        let ratios = cfg.settings.ratios.unwrap();
        assert_eq!(ratios[&StatementKind::Select], 0.50);
    }

    #[test]
    fn bad_ratio_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqlgauge.yaml");
        std::fs::write(
            &path,
            r#"suite: s
model: m
db: db.sqlite
corpus: corpus.json
settings:
  ratios:
    select: 1.5
"#,
        )
        .unwrap();
        assert!(load_config(&path).is_err());
    }
}
