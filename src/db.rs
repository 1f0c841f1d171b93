use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

const FILE_POOL_SIZE: u32 = 5;

// Cascading deletes (session -> exercises -> sets) rely on this pragma,
// which SQLite scopes to a single connection.
fn prepare_connection(conn: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
}

/// Strips the `sqlite:` scheme and any `?mode=...` query from a database URL.
fn database_path(database_url: &str) -> &str {
    let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);
    let path = path.strip_prefix("//").unwrap_or(path);
    path.split('?').next().unwrap_or(path)
}

pub fn create_pool(database_url: &str) -> Result<DbPool, r2d2::Error> {
    let path = database_path(database_url);
    if path == ":memory:" {
        return create_memory_pool();
    }

    tracing::debug!(path, "opening sqlite database");
    let manager = SqliteConnectionManager::file(Path::new(path)).with_init(prepare_connection);
    Pool::builder().max_size(FILE_POOL_SIZE).build(manager)
}

/// Single-connection pool so every checkout sees the same in-memory database.
pub fn create_memory_pool() -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::memory().with_init(prepare_connection);
    Pool::builder().max_size(1).build(manager)
}
