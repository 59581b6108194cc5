use product_core::db::migrations::latest_version;
use product_core::db::{open_db, open_db_for_request, open_db_in_memory, reset_db, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "Product");
    assert_eq!(product_count(&conn), 3);
}

#[test]
fn product_table_uses_entity_column_names() {
    let conn = open_db_in_memory().unwrap();

    let mut stmt = conn.prepare("PRAGMA table_info(Product);").unwrap();
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>("name"))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        columns,
        vec!["id", "name", "quantity", "price", "description"]
    );
}

#[test]
fn request_open_reuses_bootstrapped_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.db");
    let bootstrap = open_db(&path).unwrap();
    bootstrap
        .execute("DELETE FROM Product WHERE id = 2;", [])
        .unwrap();

    let conn = open_db_for_request(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(product_count(&conn), 2);
    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn request_open_on_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("products.db");

    let err = open_db_for_request(&path).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    conn_first
        .execute("DELETE FROM Product WHERE id = 3;", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    // Seed runs once; reopening must not restore deleted rows.
    assert_eq!(product_count(&conn_second), 2);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reset_db_discards_data_and_reseeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reset.db");

    let conn = open_db(&path).unwrap();
    conn.execute("DELETE FROM Product;", []).unwrap();
    drop(conn);

    let conn = reset_db(&path).unwrap();
    assert_eq!(product_count(&conn), 3);
}

#[test]
fn reset_db_accepts_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let conn = reset_db(dir.path().join("absent.db")).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn product_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM Product;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
