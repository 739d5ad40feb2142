/// Textual similarity between two SQL strings, in `[0, 1]`.
///
/// Implementations must be deterministic and independent of execution; the
/// specific algorithm (alignment ratio, edit distance, token overlap) is a
/// pluggable choice wired in by the caller.
pub trait SimilarityScorer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Score the raw (non-normalized) strings. `score(x, x)` must be `1.0`
    /// for any `x`, and every result must lie in `[0, 1]`.
    fn score(&self, a: &str, b: &str) -> f64;
}
