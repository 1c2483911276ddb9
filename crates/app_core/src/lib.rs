//! Fade Core Domain Logic
//!
//! This crate contains:
//! - Tags and the up/down tag cycle
//! - Playlist and navigation
//! - Viewing modes (Normal, Compare, Triptych)
//! - Preloading, timers and directory reconciliation
//! - The session that ties them together, plus tokio drivers for it
//! - Configuration and error types

pub mod config;
pub mod error;
pub mod image_loader;
pub mod input;
pub mod mode;
pub mod navigation;
pub mod playlist;
pub mod preload;
pub mod reconcile;
pub mod render;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod shuffle;
pub mod tag;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{AppConfig, InitialMode, LoopPolicy, SlideshowConfig, TagConfig};
pub use error::AppError;
pub use image_loader::{ImageHandle, ImageLoader, ImageSource, LoadedImage, PreloadFetcher};
pub use input::{route, Action, CommandId, InputEvent};
pub use mode::{ModeController, ModeKind, ModeState};
pub use navigation::Navigator;
pub use playlist::{Merge, Playlist};
pub use preload::{PreloadCache, PreloadTicket};
pub use reconcile::{DirectoryLister, DirectoryReconciler, ImageLister};
pub use render::{Assignment, Indicator, Notice, PlaybackIcon, Renderer, Role, Transition};
pub use scheduler::{Scheduler, TimerDriver, TimerPurpose, TimerToken};
pub use session::{Collaborators, Flow, Session, SessionEvent};
pub use shuffle::{fresh_seed, shuffle_with_seed, SeededRng};
pub use tag::{Tag, TagDirection, TagMarkers, TagView};
