use sqlgauge_core::metrics_api::SimilarityScorer;
use std::sync::Arc;

pub mod levenshtein;
pub mod matching_blocks;

pub fn default_scorer() -> Arc<dyn SimilarityScorer> {
    Arc::new(matching_blocks::MatchingBlocksScorer)
}

pub fn scorer_by_name(name: &str) -> Option<Arc<dyn SimilarityScorer>> {
    match name {
        "matching_blocks" => Some(Arc::new(matching_blocks::MatchingBlocksScorer)),
        "levenshtein" => Some(Arc::new(levenshtein::LevenshteinScorer)),
        _ => None,
    }
}
