//! Directory listing at start-up and on every rescan

use crate::error::AppError;
use crate::shuffle::{fresh_seed, shuffle_with_seed};
use std::path::{Path, PathBuf};

/// Produces the current image listing of a directory
pub trait ImageLister: Send {
    fn list(&self, directory: &Path) -> Result<Vec<String>, AppError>;
}

/// Lists through `app_fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryLister;

impl ImageLister for DirectoryLister {
    fn list(&self, directory: &Path) -> Result<Vec<String>, AppError> {
        Ok(app_fs::list_images(directory)?)
    }
}

/// Initial listing with the seed that ordered it
#[derive(Debug, Clone)]
pub struct InitialListing {
    pub items: Vec<String>,
    /// Seed of the shuffle, when randomized
    pub seed: Option<u64>,
}

/// Re-lists the source directory and orders the result
pub struct DirectoryReconciler {
    directory: PathBuf,
    lister: Box<dyn ImageLister>,
    random: bool,
}

impl DirectoryReconciler {
    pub fn new(directory: PathBuf, lister: Box<dyn ImageLister>, random: bool) -> Self {
        Self {
            directory,
            lister,
            random,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// First listing. An empty directory cannot start a session.
    pub fn initial(&self, seed: Option<u64>) -> Result<InitialListing, AppError> {
        let mut items = self.lister.list(&self.directory)?;
        if items.is_empty() {
            return Err(AppError::EmptyPlaylist(self.directory.display().to_string()));
        }

        let seed = if self.random {
            let seed = seed.unwrap_or_else(fresh_seed);
            shuffle_with_seed(&mut items, seed);
            tracing::info!("Shuffled {} images with seed {}", items.len(), seed);
            Some(seed)
        } else {
            None
        };

        Ok(InitialListing { items, seed })
    }

    /// Fresh listing for a merge, or `None` when it should be ignored.
    ///
    /// Randomized listings are reshuffled with a newly drawn seed each time.
    pub fn rescan(&self) -> Option<Vec<String>> {
        let mut items = match self.lister.list(&self.directory) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Rescan of {} failed: {}", self.directory.display(), e);
                return None;
            }
        };

        if items.is_empty() {
            tracing::info!("Rescan of {} found no images, keeping playlist", self.directory.display());
            return None;
        }

        if self.random {
            shuffle_with_seed(&mut items, fresh_seed());
        }
        Some(items)
    }
}

impl std::fmt::Debug for DirectoryReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryReconciler")
            .field("directory", &self.directory)
            .field("random", &self.random)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedLister;
    use tempfile::TempDir;

    fn names(items: &[String]) -> Vec<&str> {
        items
            .iter()
            .map(|p| p.rsplit(['/', '\\']).next().unwrap_or(p))
            .collect()
    }

    #[test]
    fn test_initial_from_directory() {
        let dir = TempDir::new().unwrap();
        for name in ["b.png", "a.JPG", ".hidden.jpg", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let reconciler = DirectoryReconciler::new(dir.path().to_path_buf(), Box::new(DirectoryLister), false);
        let listing = reconciler.initial(None).unwrap();
        assert_eq!(names(&listing.items), vec!["a.JPG", "b.png"]);
        assert_eq!(listing.seed, None);
    }

    #[test]
    fn test_empty_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let reconciler = DirectoryReconciler::new(dir.path().to_path_buf(), Box::new(DirectoryLister), false);
        assert!(matches!(reconciler.initial(None), Err(AppError::EmptyPlaylist(_))));
    }

    #[test]
    fn test_seeded_initial_is_reproducible() {
        let items: Vec<String> = (0..10).map(|i| format!("{}.jpg", i)).collect();
        let lister = ScriptedLister::new(vec![items.clone(), items.clone()]);
        let reconciler = DirectoryReconciler::new(PathBuf::from("/pics"), Box::new(lister), true);

        let first = reconciler.initial(Some(99)).unwrap();
        let second = reconciler.initial(Some(99)).unwrap();
        assert_eq!(first.seed, Some(99));
        assert_eq!(first.items, second.items);

        let mut sorted = first.items.clone();
        sorted.sort();
        assert_eq!(sorted, {
            let mut s = items;
            s.sort();
            s
        });
    }

    #[test]
    fn test_random_without_seed_draws_one() {
        let lister = ScriptedLister::new(vec![vec!["a.jpg".into(), "b.jpg".into()]]);
        let reconciler = DirectoryReconciler::new(PathBuf::from("/pics"), Box::new(lister), true);
        assert!(reconciler.initial(None).unwrap().seed.is_some());
    }

    #[test]
    fn test_rescan_ignores_empty_and_errors() {
        let lister = ScriptedLister::new(vec![vec![]]);
        lister.fail_next();
        let reconciler = DirectoryReconciler::new(PathBuf::from("/pics"), Box::new(lister), false);
        assert_eq!(reconciler.rescan(), None);
        assert_eq!(reconciler.rescan(), None);
    }
}
