use serde::{Deserialize, Serialize};

/// Classification of a SQL string by its leading keyword.
///
/// Best-effort heuristic, not a parser: multi-statement batches and
/// CTE-prefixed queries (`WITH ...`) classify to none of the four kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub const ALL: [StatementKind; 4] = [
        StatementKind::Select,
        StatementKind::Insert,
        StatementKind::Update,
        StatementKind::Delete,
    ];

    pub fn classify(sql: &str) -> Option<Self> {
        // Keyword boundary rather than prefix match, so "selection" is not a SELECT.
        let keyword: String = sql
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        if keyword.eq_ignore_ascii_case("select") {
            Some(StatementKind::Select)
        } else if keyword.eq_ignore_ascii_case("insert") {
            Some(StatementKind::Insert)
        } else if keyword.eq_ignore_ascii_case("update") {
            Some(StatementKind::Update)
        } else if keyword.eq_ignore_ascii_case("delete") {
            Some(StatementKind::Delete)
        } else {
            None
        }
    }

    pub fn is_mutation(self) -> bool {
        !matches!(self, StatementKind::Select)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
        }
    }
}

/// One corpus entry: a natural-language question and its reference SQL.
/// Immutable once loaded; `kind` is derived from `reference_sql` at load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub id: String,
    pub question: String,
    pub reference_sql: String,
    pub kind: StatementKind,
}

/// A single SQLite scalar value as captured from a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

pub type Row = Vec<Scalar>;

/// Full dump of one table, captured after a mutating statement ran but
/// before its transaction was rolled back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub table: String,
    pub rows: Vec<Row>,
}

/// Observable effect of running one statement against one doomed
/// transaction. `result_rows` for reads, `affected_rows` (plus the target
/// table snapshot when it could be identified) for writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_rows: Option<Vec<Row>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_after: Option<TableSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionOutcome {
    pub fn rows(rows: Vec<Row>) -> Self {
        Self {
            succeeded: true,
            result_rows: Some(rows),
            affected_rows: None,
            table_after: None,
            error: None,
        }
    }

    pub fn mutation(affected: usize, table_after: Option<TableSnapshot>) -> Self {
        Self {
            succeeded: true,
            result_rows: None,
            affected_rows: Some(affected),
            table_after,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            result_rows: None,
            affected_rows: None,
            table_after: None,
            error: Some(message.into()),
        }
    }
}

/// Per-sample scoring result. All four metric fields are pure functions of
/// the two SQL strings and the two outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleVerdict {
    pub sample_id: String,
    pub question: String,
    pub kind: StatementKind,
    pub reference_sql: String,
    pub candidate_sql: String,
    pub exact_match: bool,
    pub execution_match: bool,
    pub executable: bool,
    pub similarity: f64,
    pub reference_outcome: ExecutionOutcome,
    pub candidate_outcome: ExecutionOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl SampleVerdict {
    /// A failing reference is a corpus defect, not a candidate failure.
    pub fn is_reference_defect(&self) -> bool {
        !self.reference_outcome.succeeded
    }
}

/// Dataset-level statistics, recomputable from `per_sample` at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub suite: String,
    pub model: String,
    pub sample_count: usize,
    pub exact_match_accuracy: f64,
    pub execution_accuracy: f64,
    pub avg_similarity: f64,
    pub execution_success_rate: f64,
    pub reference_defects: usize,
    pub generated_at: String,
    pub per_sample: Vec<SampleVerdict>,
}
