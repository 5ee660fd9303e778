//! casavida-api: HTTP backend for the CasaVida marketing dashboard.
//!
//! Usage:
//!   casavida-api --config casavida.json
//!   casavida-api --db casavida.db --bind 0.0.0.0:5000 --seed

use anyhow::Result;
use casavida_api::{run, AppState};
use casavida_core::{config::AppConfig, seed::seed_crisis_scenario};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = AppConfig::load(string_arg(&args, "--config"))?;
    if let Some(db) = string_arg(&args, "--db") {
        config.db_path = db.to_string();
    }
    if let Some(bind) = string_arg(&args, "--bind") {
        config.bind_addr = bind.to_string();
    }
    let seed_on_start = args.iter().any(|a| a == "--seed");

    log::info!("CasaVida dashboard API v{}", env!("CARGO_PKG_VERSION"));
    log::info!("  db:          {}", config.db_path);
    log::info!("  draw source: {}", config.draw_source.name());

    let state = AppState::from_config(&config)?;
    if seed_on_start {
        let summary = seed_crisis_scenario(&*state.store.lock().await)?;
        log::info!("  seeded:      {summary:?}");
    }

    run(state, &config.bind_addr).await
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
