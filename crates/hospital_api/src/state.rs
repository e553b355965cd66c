//! Shared application state.
//!
//! The store is constructed explicitly and injected into every handler, so
//! each test can own an isolated in-memory database.

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};
use hospital_core::db::{open_pool, DbPool, DbResult};
use rusqlite::Connection;
use std::sync::Arc;

/// Handler state: a pool of migrated SQLite connections plus configuration.
#[derive(Clone)]
pub struct AppState {
    pool: DbPool,
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Wraps an already migrated pool.
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Opens `config.database` as a pool and applies migrations.
    pub fn open(config: ServerConfig) -> DbResult<Self> {
        let pool = open_pool(&config.database, config.max_connections)?;
        Ok(Self::new(pool, config))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Runs `f` against a pooled connection on the blocking thread pool.
    ///
    /// SQLite calls block, so they never run on an async worker thread.
    pub async fn with_conn<T, F>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&Connection) -> ApiResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|err| ApiError::Internal(format!("no store connection available: {err}")))?;
            f(&conn)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("store task did not complete: {err}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::config::ServerConfig;

    #[tokio::test]
    async fn open_in_memory_store_and_query() {
        let state = AppState::open(ServerConfig::for_testing()).unwrap();
        let one: i64 = state
            .with_conn(|conn| Ok(conn.query_row("SELECT 1;", [], |row| row.get(0))?))
            .await
            .unwrap();
        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn clones_share_one_store() {
        let state = AppState::open(ServerConfig::for_testing()).unwrap();
        let clone = state.clone();
        state
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO hospitals (name, foundation_year, address, capacity)
                     VALUES ('Shared', 2000, 'Here', 1);",
                    [],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let count: i64 = clone
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM hospitals;", [], |row| row.get(0))?)
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn file_store_serves_concurrent_requests() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            database: dir.path().join("api.sqlite").display().to_string(),
            max_connections: 4,
            ..ServerConfig::default()
        };
        let state = AppState::open(config).unwrap();

        let mut tasks = Vec::new();
        for n in 0..8 {
            let state = state.clone();
            tasks.push(tokio::spawn(async move {
                state
                    .with_conn(move |conn| {
                        conn.execute(
                            "INSERT INTO hospitals (name, foundation_year, address, capacity)
                             VALUES (?1, 1900, ?2, 10);",
                            [format!("Hospital {n}"), format!("{n} Parallel Rd")],
                        )?;
                        Ok(())
                    })
                    .await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let count: i64 = state
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM hospitals;", [], |row| row.get(0))?)
            })
            .await
            .unwrap();
        assert_eq!(count, 8);
    }
}
