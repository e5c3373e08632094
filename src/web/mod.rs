//! # Web Surface
//!
//! HTML chat page served with axum: persona form, scrolling message list,
//! message input and a reset action. One [`ChatSession`] per session id.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! [`ChatSession`]: crate::features::conversation::ChatSession

pub mod error;
pub mod handlers;
pub mod render;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use std::sync::Arc;

use crate::features::completion::CompletionGateway;
use crate::features::conversation::SessionStore;
use crate::features::personas::PresetCatalog;

/// Shared handles for every request
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub presets: Arc<PresetCatalog>,
    pub gateway: Arc<dyn CompletionGateway>,
}

impl AppState {
    pub fn new(
        sessions: Arc<SessionStore>,
        presets: PresetCatalog,
        gateway: Arc<dyn CompletionGateway>,
    ) -> Self {
        Self {
            sessions,
            presets: Arc::new(presets),
            gateway,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/session/{id}", get(handlers::show_session))
        .route("/session/{id}/persona", post(handlers::set_persona))
        .route(
            "/session/{id}/messages",
            get(handlers::list_messages).post(handlers::post_message),
        )
        .route("/session/{id}/reset", post(handlers::reset_session))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(bind_address: &str, state: AppState) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("🌐 Chat server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
