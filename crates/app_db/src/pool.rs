//! SQLite connection pool for the tag database

use crate::{DbError, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Tag reads happen on the control thread; a locked database must not stall it for long
const BUSY_TIMEOUT_MS: u32 = 250;
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(2);

/// Open a small pool on the tag database at `path`
pub fn init_pool(path: &Path) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(path).with_init(|conn| {
        conn.execute_batch(&format!(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = {};
            ",
            BUSY_TIMEOUT_MS
        ))
    });

    Pool::builder()
        .max_size(2)
        .min_idle(Some(1))
        .connection_timeout(CHECKOUT_TIMEOUT)
        .build(manager)
        .map_err(|e| DbError::Pool(e.to_string()))
}
