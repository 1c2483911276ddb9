//! Ordered item sequence plus the current position

/// Result of merging a fresh listing into the playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub old_index: usize,
    pub new_index: usize,
    /// The previously current item is still present (possibly at a new position)
    pub identity_kept: bool,
}

/// Ordered sequence of item paths.
///
/// Non-empty ⇒ `current` is always a valid position. Empty ⇒ `current` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    items: Vec<String>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new(items: Vec<String>) -> Self {
        let current = if items.is_empty() { None } else { Some(0) };
        Self { items, current }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current.and_then(|i| self.path(i))
    }

    pub fn path(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn position_of(&self, path: &str) -> Option<usize> {
        self.items.iter().position(|p| p == path)
    }

    /// Move to `index`; out-of-range requests are refused
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Replace the sequence with `items`, keeping the viewer on the same item if it survived.
    ///
    /// The new position is the old current item's position in `items` when present,
    /// otherwise the old index clamped to the new length. An empty listing is refused
    /// and leaves the playlist untouched.
    pub fn merge(&mut self, items: Vec<String>) -> Option<Merge> {
        if items.is_empty() {
            return None;
        }

        let old_index = self.current.unwrap_or(0);
        let kept = self
            .current_path()
            .and_then(|path| items.iter().position(|p| p == path));

        let new_index = kept.unwrap_or_else(|| old_index.min(items.len() - 1));

        self.items = items;
        self.current = Some(new_index);

        Some(Merge {
            old_index,
            new_index,
            identity_kept: kept.is_some(),
        })
    }
}
