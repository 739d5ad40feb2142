use crate::errors::InsufficientCorpusError;
use crate::model::{Sample, StatementKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Desired share of the test subset per statement kind. Kinds absent from
/// the map get no quota of their own (they can still arrive via backfill).
pub type RatioMap = BTreeMap<StatementKind, f64>;

/// Realistic workload skew: reads dominant, writes roughly equal minority
/// shares. A configuration default, not a hard-coded policy.
pub fn default_ratios() -> RatioMap {
    BTreeMap::from([
        (StatementKind::Select, 0.50),
        (StatementKind::Insert, 0.17),
        (StatementKind::Update, 0.17),
        (StatementKind::Delete, 0.16),
    ])
}

/// Deterministically pick a stratified subset of the corpus.
///
/// Partitions by statement kind, shuffles each partition with a seeded RNG,
/// and takes `round(target_count * ratio)` per kind. A partition with fewer
/// samples than requested yields what it has (logged, never an error);
/// leftover budget is backfilled from unused SELECT samples first, then any
/// other unused samples. The result is re-sorted into corpus order so two
/// runs with the same seed produce identical reports.
///
/// Fails only when the entire corpus is empty.
pub fn select(
    corpus: &[Sample],
    target_count: usize,
    ratios: &RatioMap,
    seed: u64,
) -> Result<Vec<Sample>, InsufficientCorpusError> {
    if corpus.is_empty() {
        return Err(InsufficientCorpusError);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pools: BTreeMap<StatementKind, Vec<usize>> = BTreeMap::new();
    for kind in StatementKind::ALL {
        pools.insert(kind, Vec::new());
    }
    for (i, sample) in corpus.iter().enumerate() {
        pools.get_mut(&sample.kind).expect("all kinds present").push(i);
    }
    // Fixed iteration order keeps the shuffle sequence reproducible.
    for kind in StatementKind::ALL {
        pools.get_mut(&kind).expect("all kinds present").shuffle(&mut rng);
    }

    let mut chosen: Vec<usize> = Vec::new();
    let mut taken: BTreeMap<StatementKind, usize> = BTreeMap::new();
    for kind in StatementKind::ALL {
        let ratio = ratios.get(&kind).copied().unwrap_or(0.0);
        let desired = (target_count as f64 * ratio).round() as usize;
        let pool = &pools[&kind];
        let budget = target_count.saturating_sub(chosen.len());
        let take = desired.min(pool.len()).min(budget);
        if take < desired {
            tracing::warn!(
                kind = kind.as_str(),
                desired,
                available = pool.len(),
                "stratum shortfall; taking what is available"
            );
        }
        chosen.extend_from_slice(&pool[..take]);
        taken.insert(kind, take);
    }

    // Backfill remaining budget, reads first (matching the workload skew),
    // then any other unused samples.
    let mut remaining = target_count.saturating_sub(chosen.len());
    for kind in StatementKind::ALL {
        if remaining == 0 {
            break;
        }
        let pool = &pools[&kind];
        let already = taken[&kind];
        let extra = remaining.min(pool.len() - already);
        chosen.extend_from_slice(&pool[already..already + extra]);
        remaining -= extra;
    }

    chosen.sort_unstable();
    Ok(chosen.into_iter().map(|i| corpus[i].clone()).collect())
}
