use crate::filter::unicode_lower_utils;
use anyhow::Context;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Per-connection setup: pragmas SQLite keeps off by default, plus the SQL
/// functions the filter queries rely on.
#[derive(Debug)]
struct SqliteSetup;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqliteSetup {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(r2d2::Error::QueryError)?;

        unicode_lower_utils::register_impl(conn, |name: String| name.to_lowercase())
            .map_err(r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_url: &str, max_size: u32) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqliteSetup))
        .build(manager)
        .with_context(|| format!("Failed to create database pool for {}", database_url))?;

    // Run pending migrations on startup
    let mut conn = pool
        .get()
        .context("Failed to get DB connection for migrations")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {}", e))?;

    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "applied database migrations");
    }

    Ok(pool)
}


#[cfg(test)]
mod tests {
    use super::*;
    use diesel::prelude::*;
    use diesel::sql_types::Integer;

    #[derive(QueryableByName)]
    struct Pragma {
        #[diesel(sql_type = Integer)]
        foreign_keys: i32,
    }

    #[test]
    fn test_foreign_keys_enabled_on_pooled_connections() {
        let (_dir, pool) = testing::temp_pool();
        let mut conn = pool.get().unwrap();
        let pragma: Pragma = diesel::sql_query("PRAGMA foreign_keys")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(pragma.foreign_keys, 1);
    }

    #[derive(QueryableByName)]
    struct Folded {
        #[diesel(sql_type = diesel::sql_types::Text)]
        folded: String,
    }

    #[test]
    fn test_unicode_lower_registered_on_pooled_connections() {
        let (_dir, pool) = testing::temp_pool();
        let mut conn = pool.get().unwrap();
        let row: Folded = diesel::sql_query("SELECT unicode_lower('ÄPFEL Crème') AS folded")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(row.folded, "äpfel crème");
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let (dir, _pool) = testing::temp_pool();
        let path = dir.path().join("recipes.db");
        assert!(create_pool(path.to_str().unwrap(), 1).is_ok());
    }
}
