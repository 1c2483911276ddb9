//! Application configuration

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub slideshow: SlideshowConfig,
    pub tags: TagConfig,
    pub keybindings: HashMap<String, Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            slideshow: SlideshowConfig::default(),
            tags: TagConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

/// What happens when the show runs past the last item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopPolicy {
    #[serde(rename = "loop")]
    Loop,
    #[serde(rename = "no-loop")]
    NoLoop,
}

/// Viewing mode to enter right after the session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialMode {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "compare")]
    Compare,
    #[serde(rename = "triptych")]
    Triptych,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    /// How long each image stays up before auto-advance
    pub display_duration_ms: u64,
    /// Cross-fade length; only the renderer interprets it
    pub fade_duration_ms: u64,
    pub loop_mode: LoopPolicy,
    pub fit_to_screen: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub rescan_interval_ms: u64,
    pub initial_mode: InitialMode,
    pub random: bool,
    pub seed: Option<u64>,
    /// Delay between a Favorite/Trash tag and the automatic move in Normal and Triptych
    pub tag_advance_delay_ms: u64,
    /// Same, for the comparison pointer in Compare mode
    pub compare_tag_advance_delay_ms: u64,
    pub notice_duration_ms: u64,
    pub icon_duration_ms: u64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            display_duration_ms: 10_000,
            fade_duration_ms: 1_500,
            loop_mode: LoopPolicy::Loop,
            fit_to_screen: true,
            window_width: 800,
            window_height: 1200,
            rescan_interval_ms: 30_000,
            initial_mode: InitialMode::Normal,
            random: false,
            seed: None,
            tag_advance_delay_ms: 500,
            compare_tag_advance_delay_ms: 50,
            notice_duration_ms: 1_500,
            icon_duration_ms: 800,
        }
    }
}

impl SlideshowConfig {
    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_duration_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }

    pub fn rescan_interval(&self) -> Duration {
        Duration::from_millis(self.rescan_interval_ms)
    }

    pub fn tag_advance_delay(&self) -> Duration {
        Duration::from_millis(self.tag_advance_delay_ms)
    }

    pub fn compare_tag_advance_delay(&self) -> Duration {
        Duration::from_millis(self.compare_tag_advance_delay_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }

    pub fn icon_duration(&self) -> Duration {
        Duration::from_millis(self.icon_duration_ms)
    }

    /// Reject values that would make timers spin or never fire
    pub fn validate(&self) -> Result<(), crate::AppError> {
        if self.display_duration_ms == 0 {
            return Err(crate::AppError::Config("display duration must be positive".into()));
        }
        if self.rescan_interval_ms == 0 {
            return Err(crate::AppError::Config("rescan interval must be positive".into()));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(crate::AppError::Config("window size must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Marker whose presence means Favorite
    pub favorite_marker: String,
    /// Marker whose presence means Trash (wins over Favorite)
    pub trash_marker: String,
    /// SQLite tag database; defaults to the data directory
    pub database: Option<PathBuf>,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            favorite_marker: "Green".to_string(),
            trash_marker: "Red".to_string(),
            database: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "Fade", "Fade")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

fn default_keybindings() -> HashMap<String, Vec<String>> {
    use crate::input::CommandId;

    let mut kb = HashMap::new();

    kb.insert(CommandId::NAV_NEXT.into(), vec!["Right".into(), "l".into()]);
    kb.insert(CommandId::NAV_PREV.into(), vec!["Left".into(), "h".into()]);

    kb.insert(CommandId::TAG_UP.into(), vec!["Up".into(), "k".into()]);
    kb.insert(CommandId::TAG_DOWN.into(), vec!["Down".into(), "j".into()]);

    kb.insert(CommandId::VIEW_TOGGLE_PAUSE.into(), vec!["Space".into(), "p".into()]);
    kb.insert(CommandId::VIEW_COMPARE.into(), vec!["s".into()]);
    kb.insert(CommandId::VIEW_TRIPTYCH.into(), vec!["t".into()]);

    kb.insert(CommandId::APP_QUIT.into(), vec!["Escape".into(), "q".into()]);

    kb
}
