mod app;
mod config;
mod error;
mod gift;
mod language;
mod metadata;
mod poster_cache;
mod query_cache;
mod sections;
mod snowfall;
mod ui;

use std::sync::Arc;

use ratatui_image::picker::Picker;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app::App;
use crate::config::Config;
use crate::error::Result;
use crate::language::LanguageStore;
use crate::metadata::tmdb::TmdbClient;
use crate::poster_cache::PosterCache;

fn setup_logging() -> Result<()> {
    let data_dir = config::data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    let file_appender = tracing_appender::rolling::daily(&data_dir, "marquee.log");

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("marquee=info")))
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Log to a file, the TUI owns the terminal
    if let Err(e) = setup_logging() {
        eprintln!("Warning: Could not set up logging: {}", e);
    }

    info!("Starting marquee");

    let config = Config::load()?;
    info!("Loaded config");

    // Fail before touching the terminal when the token is missing
    let client = TmdbClient::from_env(&config.tmdb)?;

    let language_store = LanguageStore::open(config::language_path()?);
    info!(
        language = %language_store.get(),
        path = %language_store.path().display(),
        "Loaded language preference"
    );

    let posters = PosterCache::new(config::cache_dir()?.join("posters"), &config.tmdb)?;

    let mut terminal = app::init_terminal()?;

    let picker = Picker::from_query_stdio().unwrap_or_else(|e| {
        warn!(error = ?e, "Terminal graphics query failed, using half blocks");
        Picker::halfblocks()
    });

    let accent = ui::widgets::parse_accent_color(&config.ui.accent_color);
    let _ = app::play_splash(&mut terminal, accent);

    let mut app = App::new(config, Arc::new(client), language_store, posters, picker);
    let result = app.run(&mut terminal).await;

    app::restore_terminal()?;

    result
}
