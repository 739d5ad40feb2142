use crate::model::{ExecutionOutcome, Scalar, StatementKind, TableSnapshot};
use anyhow::Context;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Transaction};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Runs one statement at a time against the provisioned database, each
/// inside its own transaction that is always rolled back.
///
/// The rollback is the central correctness requirement: without it, an
/// INSERT evaluated early would pollute row counts for every later sample.
/// The harness never owns schema creation; the database is provisioned
/// before evaluation begins.
#[derive(Clone)]
pub struct IsolatedExecutor {
    conn: Arc<Mutex<Connection>>,
}

impl IsolatedExecutor {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self::from_connection(conn))
    }

    pub fn memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already-provisioned connection (used by tests that build
    /// their schema first).
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Execute one statement inside a doomed transaction and capture its
    /// observable effect. All SQL failures come back as data
    /// (`succeeded: false`), never as errors.
    pub fn execute(&self, sql: &str) -> ExecutionOutcome {
        if sql.trim().is_empty() {
            // Placeholder candidates from failed generators land here.
            return ExecutionOutcome::error("empty statement");
        }
        let mut guard = self.conn.lock().unwrap();
        let tx = match guard.transaction() {
            Ok(tx) => tx,
            Err(e) => return ExecutionOutcome::error(format!("failed to begin transaction: {e}")),
        };
        let outcome = match execute_in_tx(&tx, sql) {
            Ok(outcome) => outcome,
            Err(e) => ExecutionOutcome::error(e.to_string()),
        };
        // Dropping the transaction without commit rolls it back; nothing
        // under test leaves a durable trace.
        drop(tx);
        outcome
    }

    /// Render the provisioned schema (table DDL from `sqlite_master`) as
    /// prompt context for the generator.
    pub fn schema_context(&self) -> anyhow::Result<String> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT sql FROM sqlite_master
             WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' AND sql IS NOT NULL
             ORDER BY name",
        )?;
        let ddl = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ddl.join("\n\n"))
    }
}

fn execute_in_tx(tx: &Transaction<'_>, sql: &str) -> rusqlite::Result<ExecutionOutcome> {
    match StatementKind::classify(sql) {
        Some(kind) if kind.is_mutation() => {
            let affected = tx.execute(sql, [])?;
            // A matching affected-row-count alone is insufficient: two
            // different UPDATEs can touch the same number of rows with
            // different resulting values. Dump the target table while the
            // transaction is still alive.
            let table_after = match target_table(sql, kind) {
                Some(table) => {
                    let rows = dump_table(tx, &table)?;
                    Some(TableSnapshot { table, rows })
                }
                None => None,
            };
            Ok(ExecutionOutcome::mutation(affected, table_after))
        }
        // SELECT, plus anything the heuristic cannot classify (CTEs and
        // the like), goes through the row-capture path. Row order is the
        // engine's; no re-sorting.
        _ => {
            let mut stmt = tx.prepare(sql)?;
            let column_count = stmt.column_count();
            let mut rows = stmt.query([])?;
            let mut captured = Vec::new();
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(column_count);
                for i in 0..column_count {
                    values.push(scalar_from(row.get_ref(i)?));
                }
                captured.push(values);
            }
            Ok(ExecutionOutcome::rows(captured))
        }
    }
}

fn scalar_from(value: ValueRef<'_>) -> Scalar {
    match value {
        ValueRef::Null => Scalar::Null,
        ValueRef::Integer(i) => Scalar::Integer(i),
        ValueRef::Real(r) => Scalar::Real(r),
        ValueRef::Text(t) => Scalar::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Scalar::Blob(b.to_vec()),
    }
}

fn dump_table(tx: &Transaction<'_>, table: &str) -> rusqlite::Result<Vec<Vec<Scalar>>> {
    let mut stmt = tx.prepare(&format!(
        "SELECT * FROM \"{}\"",
        table.replace('"', "\"\"")
    ))?;
    let column_count = stmt.column_count();
    let mut rows = stmt.query([])?;
    let mut captured = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(scalar_from(row.get_ref(i)?));
        }
        captured.push(values);
    }
    Ok(captured)
}

/// Best-effort extraction of a mutating statement's primary target table.
/// Plain tokenization, not a parser; an unrecognizable shape yields `None`
/// and the outcome carries the affected-row count only.
fn target_table(sql: &str, kind: StatementKind) -> Option<String> {
    let mut tokens = sql.split_whitespace();
    tokens.next()?; // the statement keyword itself

    let raw = match kind {
        StatementKind::Insert => {
            // INSERT [OR <action>] INTO <table> ...
            let mut t = tokens.next()?;
            if t.eq_ignore_ascii_case("or") {
                tokens.next()?; // conflict action
                t = tokens.next()?;
            }
            if !t.eq_ignore_ascii_case("into") {
                return None;
            }
            tokens.next()?
        }
        StatementKind::Update => {
            // UPDATE [OR <action>] <table> SET ...
            let t = tokens.next()?;
            if t.eq_ignore_ascii_case("or") {
                tokens.next()?;
                tokens.next()?
            } else {
                t
            }
        }
        StatementKind::Delete => {
            // DELETE FROM <table> ...
            let t = tokens.next()?;
            if !t.eq_ignore_ascii_case("from") {
                return None;
            }
            tokens.next()?
        }
        StatementKind::Select => return None,
    };

    let name: String = raw
        .chars()
        .take_while(|c| *c != '(' && *c != ';' && *c != ',')
        .filter(|c| !matches!(c, '"' | '`' | '[' | ']' | '\''))
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_table_tokenization() {
        assert_eq!(
            target_table("INSERT INTO actor (first_name) VALUES ('X')", StatementKind::Insert),
            Some("actor".into())
        );
        assert_eq!(
            target_table("insert into actor(first_name) values ('X')", StatementKind::Insert),
            Some("actor".into())
        );
        assert_eq!(
            target_table("INSERT OR IGNORE INTO rental VALUES (1)", StatementKind::Insert),
            Some("rental".into())
        );
        assert_eq!(
            target_table("UPDATE customer SET active = 0", StatementKind::Update),
            Some("customer".into())
        );
        assert_eq!(
            target_table("UPDATE OR IGNORE \"customer\" SET active = 0", StatementKind::Update),
            Some("customer".into())
        );
        assert_eq!(
            target_table("DELETE FROM rental WHERE rental_id = 1", StatementKind::Delete),
            Some("rental".into())
        );
        assert_eq!(target_table("DELETE rental", StatementKind::Delete), None);
    }
}
