//! SQLite pool construction and embedded migrations.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Pragmas applied to every connection handed out by the pool.
#[derive(Debug, Clone, Copy)]
pub struct SqlitePragmas {
    pub wal: bool,
    pub busy_timeout: Duration,
}

impl Default for SqlitePragmas {
    fn default() -> Self {
        Self {
            wal: true,
            busy_timeout: Duration::from_secs(30),
        }
    }
}

impl SqlitePragmas {
    fn script(&self) -> String {
        let mut script = String::from("PRAGMA foreign_keys = ON;");
        if self.wal {
            script.push_str(" PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        script.push_str(&format!(
            " PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ));
        script
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&self.script())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a Diesel connection pool for the given database URL.
///
/// Foreign keys are always enforced: child rows must reference an existing
/// client and catalog entry.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    establish_connection_pool_with(database_url, SqlitePragmas::default())
}

fn establish_connection_pool_with(
    database_url: &str,
    pragmas: SqlitePragmas,
) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(pragmas))
        .build(manager)
}

/// Applies every pending embedded migration and returns how many ran.
pub fn run_migrations(pool: &DbPool) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in &applied {
        log::info!("Applied migration {version}");
    }
    Ok(applied.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pragmas_script_reflects_options() {
        let script = SqlitePragmas {
            wal: false,
            busy_timeout: Duration::from_millis(1500),
        }
        .script();

        assert!(script.contains("foreign_keys = ON"));
        assert!(!script.contains("WAL"));
        assert!(script.ends_with("PRAGMA busy_timeout = 1500;"));
    }
}
