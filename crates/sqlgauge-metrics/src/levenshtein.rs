use sqlgauge_core::metrics_api::SimilarityScorer;

/// Edit-distance alternative to the matching-blocks default, selectable via
/// `settings.scorer: levenshtein`. Perfectly symmetric.
pub struct LevenshteinScorer;

impl SimilarityScorer for LevenshteinScorer {
    fn name(&self) -> &'static str {
        "levenshtein"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_and_bounds() {
        let scorer = LevenshteinScorer;
        assert_eq!(scorer.score("SELECT 1", "SELECT 1"), 1.0);
        let s = scorer.score("SELECT 1", "DELETE FROM t");
        assert!((0.0..=1.0).contains(&s));
        assert_eq!(scorer.score("abc", "abc"), scorer.score("abc", "abc"));
    }
}
