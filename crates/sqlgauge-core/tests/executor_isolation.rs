use sqlgauge_core::executor::IsolatedExecutor;
use sqlgauge_core::model::Scalar;

fn sakila_executor() -> IsolatedExecutor {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE actor (
            actor_id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        );
        CREATE TABLE customer (
            customer_id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1
        );
        INSERT INTO actor VALUES (1, 'PENELOPE', 'GUINESS');
        INSERT INTO actor VALUES (2, 'NICK', 'WAHLBERG');
        INSERT INTO actor VALUES (3, 'ED', 'CHASE');
        INSERT INTO customer VALUES (5, 'MARY', 1);
        INSERT INTO customer VALUES (6, 'PATRICIA', 1);
        "#,
    )
    .unwrap();
    IsolatedExecutor::from_connection(conn)
}

fn actor_count(executor: &IsolatedExecutor) -> i64 {
    let outcome = executor.execute("SELECT COUNT(*) FROM actor");
    assert!(outcome.succeeded);
    match outcome.result_rows.unwrap()[0][0] {
        Scalar::Integer(n) => n,
        ref other => panic!("expected integer count, got {other:?}"),
    }
}

#[test]
fn select_captures_rows_in_engine_order() {
    let executor = sakila_executor();
    let outcome = executor.execute("SELECT first_name FROM actor ORDER BY actor_id DESC");
    assert!(outcome.succeeded);
    assert!(outcome.affected_rows.is_none());
    let rows = outcome.result_rows.unwrap();
    assert_eq!(
        rows,
        vec![
            vec![Scalar::Text("ED".into())],
            vec![Scalar::Text("NICK".into())],
            vec![Scalar::Text("PENELOPE".into())],
        ]
    );
}

#[test]
fn mutations_always_roll_back() {
    let executor = sakila_executor();
    let before = actor_count(&executor);

    let insert = executor.execute("INSERT INTO actor VALUES (4, 'JENNIFER', 'DAVIS')");
    assert!(insert.succeeded);
    assert_eq!(insert.affected_rows, Some(1));
    assert_eq!(actor_count(&executor), before);

    let delete = executor.execute("DELETE FROM actor WHERE actor_id = 1");
    assert!(delete.succeeded);
    assert_eq!(delete.affected_rows, Some(1));
    assert_eq!(actor_count(&executor), before);

    let update = executor.execute("UPDATE actor SET last_name = 'X'");
    assert!(update.succeeded);
    assert_eq!(update.affected_rows, Some(3));
    let names = executor
        .execute("SELECT DISTINCT last_name FROM actor WHERE last_name = 'X'")
        .result_rows
        .unwrap();
    assert!(names.is_empty());
}

#[test]
fn snapshot_reflects_state_inside_the_doomed_transaction() {
    let executor = sakila_executor();
    let outcome = executor.execute("UPDATE customer SET active = 0 WHERE customer_id = 5");
    assert!(outcome.succeeded);
    assert_eq!(outcome.affected_rows, Some(1));

    let snapshot = outcome.table_after.unwrap();
    assert_eq!(snapshot.table, "customer");
    assert_eq!(
        snapshot.rows,
        vec![
            vec![
                Scalar::Integer(5),
                Scalar::Text("MARY".into()),
                Scalar::Integer(0)
            ],
            vec![
                Scalar::Integer(6),
                Scalar::Text("PATRICIA".into()),
                Scalar::Integer(1)
            ],
        ]
    );

    // And yet nothing stuck.
    let live = executor
        .execute("SELECT active FROM customer WHERE customer_id = 5")
        .result_rows
        .unwrap();
    assert_eq!(live, vec![vec![Scalar::Integer(1)]]);
}

#[test]
fn noop_mutation_succeeds_with_zero_affected() {
    let executor = sakila_executor();
    let outcome = executor.execute("UPDATE customer SET active = 0 WHERE customer_id = 999");
    assert!(outcome.succeeded);
    assert_eq!(outcome.affected_rows, Some(0));
    assert!(outcome.error.is_none());
}

#[test]
fn sql_failures_are_data_not_panics() {
    let executor = sakila_executor();

    let bad_column = executor.execute("SELECT nme FROM actor");
    assert!(!bad_column.succeeded);
    assert!(bad_column.error.unwrap().contains("nme"));

    let bad_table = executor.execute("INSERT INTO nonexistent VALUES (1)");
    assert!(!bad_table.succeeded);

    let empty = executor.execute("");
    assert!(!empty.succeeded);

    let constraint = executor.execute("INSERT INTO actor VALUES (1, 'DUP', 'KEY')");
    assert!(!constraint.succeeded);
}

#[test]
fn cte_candidates_go_through_the_row_path() {
    let executor = sakila_executor();
    let outcome =
        executor.execute("WITH a AS (SELECT actor_id FROM actor) SELECT COUNT(*) FROM a");
    assert!(outcome.succeeded);
    assert_eq!(
        outcome.result_rows.unwrap(),
        vec![vec![Scalar::Integer(3)]]
    );
}

#[test]
fn schema_context_renders_table_ddl() {
    let executor = sakila_executor();
    let ctx = executor.schema_context().unwrap();
    assert!(ctx.contains("CREATE TABLE actor"));
    assert!(ctx.contains("CREATE TABLE customer"));
}
