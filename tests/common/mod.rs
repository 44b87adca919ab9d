//! Shared helpers for integration tests.
#![allow(dead_code)]

use diesel_migrations::MigrationHarness;
use pushkind_clients::db::{DbPool, MIGRATIONS, establish_connection_pool};
use tempfile::TempDir;

/// Migrated SQLite database living in a temporary directory.
///
/// The directory and every file SQLite created in it are removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(filename);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("build pool");

        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
