/// Normalize a SQL string for exact-match comparison: lower-case, collapse
/// whitespace runs to single spaces, strip one trailing statement
/// terminator.
///
/// Intentionally not a SQL canonicalizer. Semantically identical statements
/// that differ in, say, quoting style or column order will still disagree
/// here; execution equivalence is the metric that catches those.
pub fn normalize_sql(sql: &str) -> String {
    let mut out = sql
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(stripped) = out.strip_suffix(';') {
        out = stripped.trim_end().to_string();
    }
    out
}

/// Exact match under normalization.
pub fn exact_match(candidate: &str, reference: &str) -> bool {
    normalize_sql(candidate) == normalize_sql(reference)
}
