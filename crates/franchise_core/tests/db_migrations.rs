use franchise_core::db::migrations::{apply_migrations, current_version, latest_version};
use franchise_core::db::{open_db, open_db_in_memory, DbError};
use franchise_core::{FranchiseRepository, RepoError, SqliteFranchiseRepository};
use rusqlite::Connection;

#[test]
fn fresh_store_has_franchise_document_columns() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_version(&conn).unwrap(), latest_version());
    assert_eq!(
        columns(&conn, "franchises"),
        vec![
            ("id".to_string(), 1),
            ("name".to_string(), 0),
            ("document".to_string(), 0),
            ("created_at".to_string(), 0),
            ("updated_at".to_string(), 0),
        ]
    );
}

#[test]
fn rows_get_millisecond_timestamps_by_default() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO franchises (id, name, document) VALUES ('f-1', 'Acme', '{}');",
        [],
    )
    .unwrap();

    let (created_at, updated_at): (i64, i64) = conn
        .query_row(
            "SELECT created_at, updated_at FROM franchises WHERE id = 'f-1';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    // Any real clock is past 2001-09-09 in milliseconds.
    assert!(created_at > 1_000_000_000_000);
    assert_eq!(created_at, updated_at);
}

#[test]
fn reopening_a_store_file_keeps_rows_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("franchises.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO franchises (id, name, document) VALUES ('f-1', 'Acme', '{}');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(current_version(&second).unwrap(), latest_version());
    let names: String = second
        .query_row("SELECT group_concat(name) FROM franchises;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(names, "Acme");
}

#[test]
fn store_written_by_newer_binary_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion {
            db_version: 999,
            ..
        }
    ));
    assert!(err.to_string().contains("999"));
}

#[test]
fn unreachable_store_path_reports_its_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("franchises.sqlite3");

    match open_db(&path) {
        Err(DbError::Open { location, .. }) => {
            assert!(location.ends_with("franchises.sqlite3"));
        }
        other => panic!("expected open failure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn failed_migration_is_rolled_back() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE legacy (name TEXT);
         CREATE INDEX franchises ON legacy (name);",
    )
    .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(err, DbError::Migration { version: 1, .. }));
    assert_eq!(current_version(&conn).unwrap(), 0);
}

#[tokio::test]
async fn repository_accepts_connection_once_migrated() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteFranchiseRepository::try_new(conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));

    let mut conn = Connection::open_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    let repo = SqliteFranchiseRepository::try_new(conn).unwrap();
    assert!(repo.find_all().await.unwrap().is_empty());
}

fn columns(conn: &Connection, table: &str) -> Vec<(String, i64)> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, i64>(5)?)))
        .unwrap();
    rows.map(Result::unwrap).collect()
}
