use crate::equivalence::outcomes_equivalent;
use crate::errors::EmptyDatasetError;
use crate::executor::IsolatedExecutor;
use crate::metrics_api::SimilarityScorer;
use crate::model::{EvaluationReport, Sample, SampleVerdict};
use crate::normalize::exact_match;
use crate::providers::llm::SqlGenerator;
use std::sync::Arc;
use tokio::time::{timeout, Duration};

/// Drives one evaluation run: generator call, two isolated executions,
/// scoring, aggregation. Sequential by construction; each sample's work is
/// side-effect-free against the shared database, so nothing here depends
/// on evaluation order.
pub struct Evaluator {
    pub executor: IsolatedExecutor,
    pub generator: Arc<dyn SqlGenerator>,
    pub scorer: Arc<dyn SimilarityScorer>,
    pub schema_context: String,
    pub timeout_seconds: u64,
    pub count_reference_defects: bool,
    pub suite: String,
    pub model: String,
}

impl Evaluator {
    /// Score one sample. Nothing in here propagates an error: generator
    /// failures and SQL failures are all recorded in the verdict so the
    /// rest of the run continues.
    pub async fn evaluate_single(&self, sample: &Sample) -> SampleVerdict {
        let start = std::time::Instant::now();

        let generated = timeout(
            Duration::from_secs(self.timeout_seconds),
            self.generator
                .generate(&sample.question, &self.schema_context),
        )
        .await;

        let (candidate_sql, generator_error) = match generated {
            Ok(Ok(sql)) => {
                if sql.trim().is_empty() {
                    (sql, Some("generator returned empty text".to_string()))
                } else {
                    (sql, None)
                }
            }
            Ok(Err(e)) => (String::new(), Some(e.to_string())),
            Err(_) => (
                String::new(),
                Some(format!(
                    "generator timed out after {}s",
                    self.timeout_seconds
                )),
            ),
        };
        if let Some(err) = &generator_error {
            tracing::warn!(sample = %sample.id, error = %err, "generator failure");
        }

        // Both executions run against logically equivalent fresh snapshots:
        // each rolls back, so their order does not matter.
        let reference_outcome = self.executor.execute(&sample.reference_sql);
        let candidate_outcome = self.executor.execute(&candidate_sql);

        if !reference_outcome.succeeded {
            tracing::warn!(
                sample = %sample.id,
                error = reference_outcome.error.as_deref().unwrap_or("unknown"),
                "reference SQL failed to execute; corpus defect"
            );
        }

        // Similarity is computed on whatever text came back, even empty;
        // a generator failure does not assume a zero score.
        let similarity = self.scorer.score(&candidate_sql, &sample.reference_sql);

        SampleVerdict {
            sample_id: sample.id.clone(),
            question: sample.question.clone(),
            kind: sample.kind,
            reference_sql: sample.reference_sql.clone(),
            exact_match: exact_match(&candidate_sql, &sample.reference_sql),
            execution_match: outcomes_equivalent(
                sample.kind,
                &reference_outcome,
                &candidate_outcome,
            ),
            executable: candidate_outcome.succeeded,
            similarity,
            candidate_sql,
            reference_outcome,
            candidate_outcome,
            generator_error,
            duration_ms: Some(start.elapsed().as_millis() as u64),
        }
    }

    /// Map `evaluate_single` over the subset in input order and fold the
    /// verdicts into a report.
    pub async fn evaluate_dataset(
        &self,
        samples: &[Sample],
    ) -> Result<EvaluationReport, EmptyDatasetError> {
        let mut verdicts = Vec::with_capacity(samples.len());
        for (i, sample) in samples.iter().enumerate() {
            tracing::info!(
                sample = %sample.id,
                kind = sample.kind.as_str(),
                progress = format!("{}/{}", i + 1, samples.len()),
                "evaluating"
            );
            let verdict = self.evaluate_single(sample).await;
            tracing::info!(
                sample = %verdict.sample_id,
                exact_match = verdict.exact_match,
                execution_match = verdict.execution_match,
                executable = verdict.executable,
                similarity = format!("{:.3}", verdict.similarity),
                "scored"
            );
            verdicts.push(verdict);
        }
        crate::report::aggregate(
            &self.suite,
            &self.model,
            verdicts,
            self.count_reference_defects,
        )
    }
}
