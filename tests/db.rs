use diesel::prelude::*;
use pushkind_clients::db::{establish_connection_pool, run_migrations};
use pushkind_clients::schema::{client_types, countries};

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_creates_and_removes_db_files.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_migrations_seed_catalogs() {
    let test_db = common::TestDb::new("test_migrations_seed_catalogs.db");
    let mut conn = test_db.pool().get().unwrap();

    let types: i64 = client_types::table.count().get_result(&mut conn).unwrap();
    let country_count: i64 = countries::table.count().get_result(&mut conn).unwrap();

    assert_eq!(types, 3);
    assert_eq!(country_count, 5);
}

#[test]
fn test_run_migrations_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("idempotent.db");
    let pool = establish_connection_pool(path.to_str().unwrap()).unwrap();

    assert_eq!(run_migrations(&pool).unwrap(), 2);
    assert_eq!(run_migrations(&pool).unwrap(), 0);
}

#[test]
fn test_foreign_keys_are_enforced() {
    let test_db = common::TestDb::new("test_foreign_keys_are_enforced.db");
    let mut conn = test_db.pool().get().unwrap();

    let result = diesel::sql_query(
        "INSERT INTO addresses (client_id, address_type_id, street, city, country_code, \
         is_primary, created_at, updated_at) \
         VALUES (999, 1, 'Main', 'Berlin', 'DE', 0, '2025-01-01 00:00:00', '2025-01-01 00:00:00')",
    )
    .execute(&mut conn);

    assert!(result.is_err());
}
