use crate::model::{ExecutionOutcome, StatementKind};

/// Execution-result equivalence between a candidate and a reference
/// outcome, judged by the reference's statement kind.
///
/// Reads compare full result-row sequences: same rows, same order, same
/// scalar values. Order sensitivity is deliberate; an ORDER BY clause is
/// part of query correctness. Writes compare the engine-reported affected
/// row count and the post-statement dump of the target table, since two
/// different mutations can touch the same number of rows.
///
/// A failed outcome on either side is never a match. A failing reference
/// is a corpus defect and is excluded from the execution-accuracy
/// denominator upstream.
pub fn outcomes_equivalent(
    kind: StatementKind,
    reference: &ExecutionOutcome,
    candidate: &ExecutionOutcome,
) -> bool {
    if !reference.succeeded || !candidate.succeeded {
        return false;
    }
    match kind {
        StatementKind::Select => match (&reference.result_rows, &candidate.result_rows) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        _ => {
            reference.affected_rows == candidate.affected_rows
                && reference.table_after == candidate.table_after
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Scalar, TableSnapshot};

    fn rows(values: &[i64]) -> Vec<Vec<Scalar>> {
        values.iter().map(|v| vec![Scalar::Integer(*v)]).collect()
    }

    #[test]
    fn select_requires_same_rows_same_order() {
        let a = ExecutionOutcome::rows(rows(&[1, 2, 3]));
        let b = ExecutionOutcome::rows(rows(&[1, 2, 3]));
        let reordered = ExecutionOutcome::rows(rows(&[3, 2, 1]));
        let shorter = ExecutionOutcome::rows(rows(&[1, 2]));

        assert!(outcomes_equivalent(StatementKind::Select, &a, &b));
        assert!(!outcomes_equivalent(StatementKind::Select, &a, &reordered));
        assert!(!outcomes_equivalent(StatementKind::Select, &a, &shorter));
    }

    #[test]
    fn mutation_requires_count_and_snapshot() {
        let snap = |active: i64| TableSnapshot {
            table: "customer".into(),
            rows: vec![vec![Scalar::Integer(5), Scalar::Integer(active)]],
        };
        let reference = ExecutionOutcome::mutation(1, Some(snap(0)));
        let same = ExecutionOutcome::mutation(1, Some(snap(0)));
        let same_count_different_values = ExecutionOutcome::mutation(1, Some(snap(1)));

        assert!(outcomes_equivalent(
            StatementKind::Update,
            &reference,
            &same
        ));
        assert!(!outcomes_equivalent(
            StatementKind::Update,
            &reference,
            &same_count_different_values
        ));
    }

    #[test]
    fn failures_never_match() {
        let ok = ExecutionOutcome::rows(rows(&[1]));
        let failed = ExecutionOutcome::error("no such column: nme");

        assert!(!outcomes_equivalent(StatementKind::Select, &ok, &failed));
        assert!(!outcomes_equivalent(StatementKind::Select, &failed, &ok));
        // Two failures are not "equivalent" either; a broken reference is
        // handled by the aggregation denominator, not here.
        assert!(!outcomes_equivalent(StatementKind::Select, &failed, &failed));
    }

    #[test]
    fn candidate_of_wrong_shape_does_not_match() {
        // Reference is an UPDATE, candidate executed as a query.
        let reference = ExecutionOutcome::mutation(1, None);
        let candidate = ExecutionOutcome::rows(rows(&[1]));
        assert!(!outcomes_equivalent(
            StatementKind::Update,
            &reference,
            &candidate
        ));
    }
}
