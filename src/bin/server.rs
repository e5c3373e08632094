use anyhow::Result;
use dotenvy::dotenv;
use log::{info, warn};
use std::sync::Arc;

use perso9::core::Config;
use perso9::features::completion::{CompletionGateway, DisabledGateway, OpenAiGateway};
use perso9::features::conversation::SessionStore;
use perso9::features::personas::PresetCatalog;
use perso9::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Perso9 chat server...");

    let presets = PresetCatalog::load_or_empty(&config.presets_path);

    let gateway: Arc<dyn CompletionGateway> = match OpenAiGateway::from_config(&config) {
        Some(gateway) => {
            info!(
                "🤖 Completions via model {} (timeout {:?})",
                config.openai_model, config.completion_timeout
            );
            Arc::new(gateway)
        }
        None => {
            warn!("OPENAI_API_KEY is not set - completions are disabled until it is configured");
            Arc::new(DisabledGateway)
        }
    };

    let sessions = Arc::new(SessionStore::new(config.greeting.clone()));

    // Drop sessions whose users went away
    let reaper = sessions.clone();
    let reap_interval = config.reap_interval;
    let session_idle = config.session_idle;
    tokio::spawn(async move {
        reaper.run_reaper(reap_interval, session_idle).await;
    });

    let state = AppState::new(sessions, presets, gateway);
    web::serve(&config.bind_address, state).await
}
