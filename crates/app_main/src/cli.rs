//! Command line, layered over the configuration file

use app_core::{AppConfig, InitialMode, LoopPolicy};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fade",
    version,
    about = "Image slideshow with fade transitions and favorite/trash curation"
)]
pub struct Cli {
    /// Directory of images, or an image to start from
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Seconds each image is displayed
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Fade transition duration in seconds
    #[arg(short, long)]
    pub fade: Option<f64>,

    /// Shuffle image order
    #[arg(short, long)]
    pub random: bool,

    /// Seed for the shuffle; drawn at random if omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Exit after showing every image once
    #[arg(long)]
    pub no_loop: bool,

    /// Use --width/--height instead of fitting to the screen
    #[arg(long)]
    pub actual_size: bool,

    /// Window width
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height
    #[arg(long)]
    pub height: Option<u32>,

    /// Seconds between directory rescans
    #[arg(long)]
    pub scan: Option<f64>,

    /// Start in compare mode
    #[arg(long, conflicts_with = "triptych")]
    pub slider: bool,

    /// Start in triptych mode
    #[arg(long)]
    pub triptych: bool,

    /// Tag database file
    #[arg(long, value_name = "PATH", conflicts_with = "in_memory_tags")]
    pub tags_db: Option<PathBuf>,

    /// Keep tags in memory only; nothing is written to disk
    #[arg(long)]
    pub in_memory_tags: bool,
}

fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}

impl Cli {
    /// Override configuration values given on the command line
    pub fn apply(&self, config: &mut AppConfig) {
        let slideshow = &mut config.slideshow;

        if let Some(d) = self.duration {
            slideshow.display_duration_ms = seconds_to_ms(d);
        }
        if let Some(f) = self.fade {
            slideshow.fade_duration_ms = seconds_to_ms(f);
        }
        if self.random {
            slideshow.random = true;
        }
        if self.seed.is_some() {
            slideshow.seed = self.seed;
        }
        if self.no_loop {
            slideshow.loop_mode = LoopPolicy::NoLoop;
        }
        if self.actual_size {
            slideshow.fit_to_screen = false;
        }
        if let Some(w) = self.width {
            slideshow.window_width = w;
        }
        if let Some(h) = self.height {
            slideshow.window_height = h;
        }
        if let Some(s) = self.scan {
            slideshow.rescan_interval_ms = seconds_to_ms(s);
        }
        if self.slider {
            slideshow.initial_mode = InitialMode::Compare;
        } else if self.triptych {
            slideshow.initial_mode = InitialMode::Triptych;
        }
        if let Some(db) = &self.tags_db {
            config.tags.database = Some(db.clone());
        }
    }
}
