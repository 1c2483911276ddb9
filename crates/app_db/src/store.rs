//! Tag store capability

use crate::Result;
use std::collections::BTreeSet;

/// The raw marker names attached to one item, e.g. `{"Green"}`
pub type TagSet = BTreeSet<String>;

/// Read/write access to the raw tag markers of an item, keyed by path.
///
/// Implementations are best-effort: callers treat any error as "no change"
/// and never let it end a session.
pub trait TagStore: Send + Sync {
    /// Current markers for `path`. An unknown path has no markers.
    fn get_tags(&self, path: &str) -> Result<TagSet>;

    /// Replace the markers for `path` with exactly `tags`.
    fn set_tags(&self, path: &str, tags: &TagSet) -> Result<()>;
}
