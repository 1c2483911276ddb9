//! SQLite-backed tag store

use crate::{DbError, DbPool, Result, TagSet, TagStore};
use rusqlite::OptionalExtension;
use xxhash_rust::xxh3::xxh3_64;

/// Durable tag store: one row per tagged path, markers in a mapping table
pub struct SqliteTagStore {
    pool: DbPool,
}

impl SqliteTagStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn path_hash(path: &str) -> i64 {
        xxh3_64(path.as_bytes()) as i64
    }
}

impl TagStore for SqliteTagStore {
    fn get_tags(&self, path: &str) -> Result<TagSet> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let mut stmt = conn.prepare_cached(
            "SELECT t.name FROM tags t
             INNER JOIN file_tags ft ON ft.tag_id = t.tag_id
             INNER JOIN files f ON f.file_id = ft.file_id
             WHERE f.path_hash = ?1",
        )?;

        let rows = stmt.query_map([Self::path_hash(path)], |row| row.get::<_, String>(0))?;

        let mut tags = TagSet::new();
        for row in rows {
            tags.insert(row?);
        }
        Ok(tags)
    }

    fn set_tags(&self, path: &str, tags: &TagSet) -> Result<()> {
        let mut conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;
        let tx = conn.transaction()?;
        let path_hash = Self::path_hash(path);

        tx.execute(
            r#"
            INSERT INTO files (path_hash, path_display)
            VALUES (?1, ?2)
            ON CONFLICT(path_hash) DO UPDATE SET
                path_display = excluded.path_display,
                updated_at = strftime('%s', 'now')
            "#,
            rusqlite::params![path_hash, path],
        )?;

        let file_id: i64 = tx.query_row(
            "SELECT file_id FROM files WHERE path_hash = ?1",
            [path_hash],
            |row| row.get(0),
        )?;

        tx.execute("DELETE FROM file_tags WHERE file_id = ?1", [file_id])?;

        for name in tags {
            tx.execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", [name])?;
            let tag_id: Option<i64> = tx
                .query_row("SELECT tag_id FROM tags WHERE name = ?1", [name], |row| row.get(0))
                .optional()?;
            if let Some(tag_id) = tag_id {
                tx.execute(
                    "INSERT OR IGNORE INTO file_tags (file_id, tag_id) VALUES (?1, ?2)",
                    [file_id, tag_id],
                )?;
            }
        }

        tx.commit()?;
        tracing::debug!("Stored tags {:?} for {}", tags, path);
        Ok(())
    }
}
