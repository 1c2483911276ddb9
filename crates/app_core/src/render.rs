//! Presentation contract between the session and whatever draws the images

use crate::image_loader::ImageHandle;
use crate::mode::ModeKind;
use crate::tag::{Tag, TagDirection};
use std::time::Duration;

/// Where an assigned image goes on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Current,
    Comparison,
    TriptychLeft,
    TriptychMiddle,
    TriptychRight,
}

/// How a newly assigned image replaces the old one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Cut,
    CrossFade(Duration),
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub role: Role,
    pub path: Option<String>,
    /// `None` when nothing could be loaded for the role
    pub image: Option<ImageHandle>,
    pub tag: Tag,
    /// Trash items are drawn dimmed
    pub dimmed: bool,
    pub transition: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackIcon {
    Paused,
    Playing,
}

/// Transient overlay, cleared by the status-decay timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Text(String),
    Icon(PlaybackIcon),
}

/// Short feedback flash after a user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// A tag step landed on Favorite or Trash
    Tagged(TagDirection),
    /// A tag step landed on Untagged
    Neutral,
    NavBack,
    NavForward,
}

/// Receives display instructions. Stateless from the session's point of view.
pub trait Renderer: Send {
    /// Switch the on-screen layout; assignments for the new roles follow
    fn layout(&mut self, mode: ModeKind);
    fn assign(&mut self, assignment: Assignment);
    /// The item shown in `role` changed tag; redraw its dimming and badge
    fn retag(&mut self, role: Role, tag: Tag);
    fn divider(&mut self, position: f64);
    fn notice(&mut self, notice: Notice);
    fn clear_notice(&mut self);
    fn indicate(&mut self, indicator: Indicator);
    /// Every item is Trash; nothing is current
    fn all_trashed(&mut self);
    /// The session ended (quit or end of a non-looping show)
    fn finished(&mut self);
}
