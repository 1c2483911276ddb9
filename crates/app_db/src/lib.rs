//! Fade Tag Storage Layer
//!
//! Provides:
//! - `TagStore`: the capability the slideshow uses to read/write an item's raw tag markers
//! - `MemoryTagStore`: process-local store (tests, `--in-memory-tags`)
//! - `SqliteTagStore`: durable store backed by an r2d2 SQLite pool

mod memory;
mod pool;
mod schema;
mod sqlite;
mod store;

pub use memory::MemoryTagStore;
pub use pool::{init_pool, DbPool};
pub use schema::migrate;
pub use sqlite::SqliteTagStore;
pub use store::{TagSet, TagStore};

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Get the database directory
pub fn db_dir() -> PathBuf {
    ProjectDirs::from("com", "Fade", "Fade")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// Default location of the tag database
pub fn default_db_path() -> PathBuf {
    db_dir().join("tags.db")
}

/// Open (creating and migrating if needed) the SQLite tag store at `path`
pub fn open_tag_store(path: &Path) -> Result<SqliteTagStore> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = init_pool(path)?;
    migrate(&pool)?;

    tracing::info!("Tag database opened at {:?}", path);
    Ok(SqliteTagStore::new(pool))
}
