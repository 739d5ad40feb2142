use crate::model::EvaluationReport;

/// Render the run summary to stderr, one line per sample plus the
/// dataset-level totals.
pub fn print_summary(report: &EvaluationReport) {
    eprintln!(
        "\nEvaluated {} samples (suite: {}, model: {})...",
        report.sample_count, report.suite, report.model
    );

    for v in &report.per_sample {
        let duration = v
            .duration_ms
            .map(|d| format!("({:.1}s)", d as f64 / 1000.0))
            .unwrap_or_default();
        let icon = if v.execution_match {
            "✅"
        } else if !v.executable {
            "💥"
        } else {
            "❌"
        };
        eprintln!(
            "{} {:<8} {:<6} exact={} exec={} sim={:.3}  {}",
            icon,
            v.sample_id,
            v.kind.as_str(),
            v.exact_match,
            v.execution_match,
            v.similarity,
            duration
        );
        if let Some(err) = &v.generator_error {
            eprintln!("    generator: {}", err);
        }
        if v.is_reference_defect() {
            eprintln!(
                "    reference defect: {}",
                v.reference_outcome.error.as_deref().unwrap_or("unknown")
            );
        } else if !v.executable {
            if let Some(err) = &v.candidate_outcome.error {
                eprintln!("    candidate error: {}", err);
            }
        }
    }

    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!(
        "exact match accuracy:   {:.3} ({:.1}%)",
        report.exact_match_accuracy,
        report.exact_match_accuracy * 100.0
    );
    eprintln!(
        "execution accuracy:     {:.3} ({:.1}%)",
        report.execution_accuracy,
        report.execution_accuracy * 100.0
    );
    eprintln!("avg similarity:         {:.3}", report.avg_similarity);
    eprintln!(
        "execution success rate: {:.3} ({:.1}%)",
        report.execution_success_rate,
        report.execution_success_rate * 100.0
    );
    if report.reference_defects > 0 {
        eprintln!(
            "reference defects:      {} (excluded from execution accuracy unless configured otherwise)",
            report.reference_defects
        );
    }
}
