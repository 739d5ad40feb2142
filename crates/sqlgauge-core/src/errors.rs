use std::fmt;

/// Configuration could not be read, parsed, or validated.
#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// The entire corpus is empty; there is nothing to select from.
///
/// Per-kind shortfalls are not errors, they are logged and the selector
/// takes what is available.
#[derive(Debug)]
pub struct InsufficientCorpusError;

impl fmt::Display for InsufficientCorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "corpus is empty: no samples to select")
    }
}

impl std::error::Error for InsufficientCorpusError {}

/// Aggregation was asked to summarize zero verdicts; every ratio would be
/// undefined.
#[derive(Debug)]
pub struct EmptyDatasetError;

impl fmt::Display for EmptyDatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no verdicts to aggregate")
    }
}

impl std::error::Error for EmptyDatasetError {}
