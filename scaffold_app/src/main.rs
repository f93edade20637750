//! Scaffold demo application
//!
//! Stands in for the platform host: sets up logging and configuration,
//! builds the media caches, exercises a few lookups, and tears the caches
//! down on exit.
//!
//! Usage: `scaffold [config.toml|config.ron] [sound ...]`

use media_cache::audio::backend::create_backend;
use media_cache::config::{Config, ConfigError, MediaConfig};
use media_cache::foundation::logging;
use media_cache::{Media, MediaError};
use std::thread;
use std::time::Duration;

/// Host-level failures
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),
}

const DEFAULT_CONFIG: &str = "media.toml";

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1).peekable();
    let config_path = args
        .next_if(|arg| arg.ends_with(".toml") || arg.ends_with(".ron"))
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let sounds: Vec<String> = args.collect();

    let config = MediaConfig::load_or_default(&config_path)?;
    let mut media = Media::new(config, create_backend());

    startup(&mut media);

    for name in &sounds {
        log::info!("Playing '{}'", name);
        let mut channel = media.sounds().channel(name)?;
        channel.play().map_err(MediaError::from)?;
        while channel.is_playing() {
            thread::sleep(Duration::from_millis(50));
            media.sounds().backend().borrow_mut().update();
        }
    }

    media.release_all();
    log::info!("Media caches released");
    Ok(())
}

/// Warm both caches and report what the bundle holds
fn startup(media: &mut Media) {
    if let Err(e) = media.preload() {
        log::warn!("Preloading media failed: {}", e);
    }

    if let Some(atlas) = media.atlas().atlas() {
        log::info!("Atlas '{}' holds {} texture(s)", atlas.image_path(), atlas.len());
    }
    if let Some(names) = media.atlas().texture_names() {
        for name in names {
            log::debug!("  texture {}", name);
        }
    }

    let sounds = media.sounds();
    log::info!("Sound library holds {} clip(s)", sounds.len());
    for name in sounds.sound_names() {
        log::debug!("  sound {}", name);
    }
}
