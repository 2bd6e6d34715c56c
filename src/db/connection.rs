// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Get the database file path under `data_dir`
///
/// Path structure: {DATA_DIR}/jobboard/jobboard.db
pub fn get_database_path(data_dir: &Path) -> AppResult<PathBuf> {
    let jobboard_dir = data_dir.join("jobboard");

    std::fs::create_dir_all(&jobboard_dir).map_err(AppError::Io)?;

    Ok(jobboard_dir.join("jobboard.db"))
}

/// Create a connection pool over the on-disk session database
///
/// Pool configuration:
/// - Max 4 connections (one client, few concurrent readers)
/// - WAL journal
/// - Busy timeout set to avoid immediate errors
pub fn create_connection_pool(data_dir: &Path) -> AppResult<ConnectionPool> {
    let db_path = get_database_path(data_dir)?;
    log::debug!("Opening session database at {}", db_path.display());

    let manager = SqliteConnectionManager::file(&db_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    });

    Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))
}

/// Single-connection pool over an in-memory database.
///
/// Every pooled connection to `:memory:` would be its own database, so the
/// pool is capped at one connection.
pub fn create_memory_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory();

    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone in-memory connection (for testing)
pub fn create_test_connection() -> AppResult<Connection> {
    Connection::open_in_memory().map_err(AppError::Database)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_creation() {
        let dir = tempfile::tempdir().unwrap();
        let path = get_database_path(dir.path()).unwrap();
        assert!(path.ends_with("jobboard/jobboard.db"));
        assert!(dir.path().join("jobboard").is_dir());
    }

    #[test]
    fn test_connection_pool_creation() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool(dir.path()).unwrap();
        let conn = get_connection(&pool).unwrap();

        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_test_connection() {
        let conn = create_test_connection().unwrap();

        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);
    }
}
