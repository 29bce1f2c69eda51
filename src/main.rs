//! Entry point for the conversation practice viewer.
//!
//! Loads `conf/config.toml`, reads the practice sheet it points at and
//! hands both to the GUI.

mod app;
mod cache;
mod cancellation;
mod config;
mod dataset;
mod session;
mod text_utils;
mod tts;

use crate::app::run_app;
use crate::config::load_config;
use crate::dataset::Dataset;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const CONFIG_PATH: &str = "conf/config.toml";

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config = load_config(Path::new(CONFIG_PATH));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        data = %config.data_path,
        sheet = ?config.data_sheet,
        level = %config.log_level,
        "Starting conversation practice"
    );
    info!(
        lang = %config.tts_lang,
        tld = %config.tts_tld,
        slow = config.tts_slow,
        volume = config.tts_volume,
        delay_secs = config.answer_delay_secs,
        "Active speech configuration"
    );

    let data_path = Path::new(&config.data_path);
    let dataset = Dataset::load(data_path, config.data_sheet.as_deref())
        .with_context(|| format!("Failed to load practice data from {}", data_path.display()))?;
    if dataset.is_empty() {
        warn!(path = %data_path.display(), "Practice sheet has no rows");
    }

    run_app(dataset, config).context("Failed to start the GUI")?;
    Ok(())
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with logging.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
