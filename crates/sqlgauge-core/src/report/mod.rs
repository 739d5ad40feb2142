use crate::errors::EmptyDatasetError;
use crate::model::{EvaluationReport, SampleVerdict};
use anyhow::Context;
use std::path::Path;

pub mod console;

/// Fold per-sample verdicts into dataset-level statistics.
///
/// By default the execution-accuracy denominator excludes samples whose
/// reference SQL failed (corpus defects): a broken reference should not
/// penalize the candidate. Passing `count_reference_defects = true` keeps
/// them in the denominator instead.
pub fn aggregate(
    suite: &str,
    model: &str,
    verdicts: Vec<SampleVerdict>,
    count_reference_defects: bool,
) -> Result<EvaluationReport, EmptyDatasetError> {
    if verdicts.is_empty() {
        return Err(EmptyDatasetError);
    }

    let sample_count = verdicts.len();
    let exact_matches = verdicts.iter().filter(|v| v.exact_match).count();
    let execution_matches = verdicts.iter().filter(|v| v.execution_match).count();
    let executable = verdicts.iter().filter(|v| v.executable).count();
    let reference_defects = verdicts.iter().filter(|v| v.is_reference_defect()).count();
    let similarity_sum: f64 = verdicts.iter().map(|v| v.similarity).sum();

    let execution_denominator = if count_reference_defects {
        sample_count
    } else {
        sample_count - reference_defects
    };
    let execution_accuracy = if execution_denominator == 0 {
        // Every reference was defective; nothing to measure against.
        0.0
    } else {
        execution_matches as f64 / execution_denominator as f64
    };

    Ok(EvaluationReport {
        suite: suite.to_string(),
        model: model.to_string(),
        sample_count,
        exact_match_accuracy: exact_matches as f64 / sample_count as f64,
        execution_accuracy,
        avg_similarity: similarity_sum / sample_count as f64,
        execution_success_rate: executable as f64 / sample_count as f64,
        reference_defects,
        generated_at: chrono::Utc::now().to_rfc3339(),
        per_sample: verdicts,
    })
}

/// Persist the full report, per-sample verdicts included, so any single
/// scoring decision can be audited later.
pub fn write_json(report: &EvaluationReport, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    Ok(())
}
