//! Three-valued curation tag and the up/down cycle over it

use crate::config::TagConfig;
use app_db::{TagSet, TagStore};
use std::fmt;
use std::sync::Arc;

/// Curation state of one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    #[default]
    Untagged,
    Favorite,
    Trash,
}

/// Direction of a tag change, as pressed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDirection {
    Up,
    Down,
}

impl Tag {
    /// One step toward Favorite: Trash → Untagged → Favorite (ceiling)
    pub fn up(self) -> Tag {
        match self {
            Tag::Trash => Tag::Untagged,
            Tag::Untagged | Tag::Favorite => Tag::Favorite,
        }
    }

    /// One step toward Trash: Favorite → Untagged → Trash (floor)
    pub fn down(self) -> Tag {
        match self {
            Tag::Favorite => Tag::Untagged,
            Tag::Untagged | Tag::Trash => Tag::Trash,
        }
    }

    pub fn cycle(self, direction: TagDirection) -> Tag {
        match direction {
            TagDirection::Up => self.up(),
            TagDirection::Down => self.down(),
        }
    }

    /// Favorite and Trash both count as a decision and trigger an advance
    pub fn is_decided(self) -> bool {
        self != Tag::Untagged
    }

    pub fn is_trash(self) -> bool {
        self == Tag::Trash
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Untagged => write!(f, "Untagged"),
            Tag::Favorite => write!(f, "Favorite"),
            Tag::Trash => write!(f, "Trash"),
        }
    }
}

/// Marker names a `Tag` is derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMarkers {
    pub favorite: String,
    pub trash: String,
}

impl Default for TagMarkers {
    fn default() -> Self {
        let config = TagConfig::default();
        Self {
            favorite: config.favorite_marker,
            trash: config.trash_marker,
        }
    }
}

impl From<&TagConfig> for TagMarkers {
    fn from(config: &TagConfig) -> Self {
        Self {
            favorite: config.favorite_marker.clone(),
            trash: config.trash_marker.clone(),
        }
    }
}

impl TagMarkers {
    /// Trash marker wins, then Favorite, else Untagged
    pub fn classify(&self, tags: &TagSet) -> Tag {
        if tags.contains(&self.trash) {
            Tag::Trash
        } else if tags.contains(&self.favorite) {
            Tag::Favorite
        } else {
            Tag::Untagged
        }
    }

    /// Rewrite `tags` so it classifies as `tag`.
    ///
    /// Both curation markers are cleared before the new one is set; unrelated markers stay.
    pub fn apply(&self, tags: &mut TagSet, tag: Tag) {
        tags.remove(&self.favorite);
        tags.remove(&self.trash);
        match tag {
            Tag::Untagged => {}
            Tag::Favorite => {
                tags.insert(self.favorite.clone());
            }
            Tag::Trash => {
                tags.insert(self.trash.clone());
            }
        }
    }
}

/// Live, uncached view of item tags through a `TagStore`.
///
/// Every read goes to the store so external edits are always visible.
/// Store failures never propagate: reads fall back to Untagged and failed
/// writes leave the previous tag in place.
#[derive(Clone)]
pub struct TagView {
    store: Arc<dyn TagStore>,
    markers: TagMarkers,
}

impl TagView {
    pub fn new(store: Arc<dyn TagStore>, markers: TagMarkers) -> Self {
        Self { store, markers }
    }

    pub fn markers(&self) -> &TagMarkers {
        &self.markers
    }

    pub fn tag_of(&self, path: &str) -> Tag {
        match self.store.get_tags(path) {
            Ok(tags) => self.markers.classify(&tags),
            Err(e) => {
                tracing::warn!("Failed to read tags for {}: {}", path, e);
                Tag::Untagged
            }
        }
    }

    pub fn is_trashed(&self, path: &str) -> bool {
        self.tag_of(path).is_trash()
    }

    /// Cycle the tag of `path` one step and persist it. Returns the tag now in effect.
    pub fn cycle(&self, path: &str, direction: TagDirection) -> Tag {
        let mut tags = match self.store.get_tags(path) {
            Ok(tags) => tags,
            Err(e) => {
                // Writing without knowing the other markers could clobber them
                tracing::warn!("Failed to read tags for {}, leaving unchanged: {}", path, e);
                return Tag::Untagged;
            }
        };

        let current = self.markers.classify(&tags);
        let next = current.cycle(direction);
        if next == current {
            tracing::debug!("{} already at {} ({:?})", path, current, direction);
            return current;
        }

        self.markers.apply(&mut tags, next);
        match self.store.set_tags(path, &tags) {
            Ok(()) => {
                tracing::info!("Tagged {}: {} -> {}", path, current, next);
                next
            }
            Err(e) => {
                tracing::warn!("Failed to write tags for {}: {}", path, e);
                current
            }
        }
    }
}

impl fmt::Debug for TagView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagView").field("markers", &self.markers).finish()
    }
}
