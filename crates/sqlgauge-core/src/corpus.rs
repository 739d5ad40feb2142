use crate::model::{Sample, StatementKind};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// On-disk corpus entry: one JSON object per question/reference pair.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusEntry {
    pub question: String,
    pub sql: String,
}

/// Load a corpus file (JSON array of `{question, sql}` objects) into
/// samples, deriving the statement kind from each reference's leading
/// keyword. Ids are assigned from corpus position so reports stay
/// auditable across runs.
///
/// Entries whose SQL classifies to none of the four kinds (DDL,
/// multi-statement text, CTE-prefixed queries) are logged and skipped;
/// the selector has no stratum for them.
pub fn load_corpus(path: &Path) -> anyhow::Result<Vec<Sample>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus {}", path.display()))?;
    let entries: Vec<CorpusEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse corpus {}", path.display()))?;
    Ok(samples_from_entries(entries))
}

pub fn samples_from_entries(entries: Vec<CorpusEntry>) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let id = format!("q{:04}", i + 1);
        match StatementKind::classify(&entry.sql) {
            Some(kind) => samples.push(Sample {
                id,
                question: entry.question,
                reference_sql: entry.sql,
                kind,
            }),
            None => {
                tracing::warn!(
                    id = %id,
                    sql = %entry.sql,
                    "skipping corpus entry with unclassifiable statement"
                );
            }
        }
    }
    samples
}
