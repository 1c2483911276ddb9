//! Fade - image slideshow with favorite/trash curation
//!
//! Entry point: parses the command line, wires the session to its tokio
//! drivers and the console front-end, then runs the control loop.

mod cli;
mod console;
mod input;

use anyhow::Result;
use app_core::runtime::{self, BackgroundFetcher, TokioTimerDriver};
use app_core::{AppConfig, Collaborators, DirectoryLister, ImageLoader, Session};
use app_db::{MemoryTagStore, TagStore};
use clap::Parser;
use cli::Cli;
use console::ConsoleRenderer;
use input::InputHandler;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging and panic hook first
    let _log_guard = app_log::init()?;

    // Clean up old logs (7 days)
    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    let cli = Cli::parse();

    tracing::info!("Fade starting...");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    });
    cli.apply(&mut config);

    // Seed is printed before the first image appears
    if config.slideshow.random {
        let seed = *config.slideshow.seed.get_or_insert_with(app_core::fresh_seed);
        println!("Shuffle seed: {}", seed);
    }

    let launch = match app_fs::resolve_launch_target(&cli.path) {
        Ok(launch) => launch,
        Err(e) => {
            let err = app_core::AppError::from(e);
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    };

    let tag_store: Arc<dyn TagStore> = if cli.in_memory_tags {
        Arc::new(MemoryTagStore::new())
    } else {
        let path = config
            .tags
            .database
            .clone()
            .unwrap_or_else(app_db::default_db_path);
        Arc::new(app_db::open_tag_store(&path)?)
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let (tx, rx) = runtime::event_channel();

        let max_size = if config.slideshow.fit_to_screen {
            None
        } else {
            Some((config.slideshow.window_width, config.slideshow.window_height))
        };
        let images = Arc::new(ImageLoader::new(max_size));

        let collaborators = Collaborators {
            tag_store,
            lister: Box::new(DirectoryLister),
            images: images.clone(),
            fetcher: Box::new(BackgroundFetcher::new(images, tx.clone())),
            timers: Box::new(TokioTimerDriver::new(tx.clone())),
            renderer: Box::new(ConsoleRenderer::stdout()),
        };

        let session = match Session::start(&config, &launch, collaborators) {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("Session failed to start: {}", e);
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        };

        if let Some(seed) = session.seed() {
            tracing::info!("Shuffle seed: {}", seed);
        }

        input::spawn_stdin_reader(InputHandler::new(config.keybindings.clone()), tx)?;

        runtime::run(session, rx).await;
        anyhow::Ok(())
    })?;

    tracing::info!("Fade exiting");
    Ok(())
}
