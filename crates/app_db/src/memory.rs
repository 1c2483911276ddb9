//! In-memory tag store

use crate::{Result, TagSet, TagStore};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Tag store that lives for the duration of the process
#[derive(Debug, Default)]
pub struct MemoryTagStore {
    tags: RwLock<HashMap<String, TagSet>>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with markers, mostly useful in tests
    pub fn with_tags<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        let store = Self::new();
        {
            let mut map = store.tags.write();
            for (path, markers) in entries {
                map.insert(
                    path.to_string(),
                    markers.iter().map(|m| m.to_string()).collect(),
                );
            }
        }
        store
    }
}

impl TagStore for MemoryTagStore {
    fn get_tags(&self, path: &str) -> Result<TagSet> {
        Ok(self.tags.read().get(path).cloned().unwrap_or_default())
    }

    fn set_tags(&self, path: &str, tags: &TagSet) -> Result<()> {
        let mut map = self.tags.write();
        if tags.is_empty() {
            map.remove(path);
        } else {
            map.insert(path.to_string(), tags.clone());
        }
        Ok(())
    }
}
