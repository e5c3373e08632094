//! Request handlers for the chat surface

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::error::{completion_status, persona_status, WebError};
use super::render::{chat_page, PageView, CUSTOM_PRESET};
use super::AppState;
use crate::features::conversation::{ChatSession, Message, SharedSession};
use crate::features::personas::{PersonaDefinition, PersonaSource, PromptBuilder};

/// Fields posted by the persona builder form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PersonaForm {
    pub preset: String,
    pub name: String,
    pub personality: String,
    pub topics: String,
    pub communication_style: String,
    pub language: String,
    pub custom_instructions: String,
    pub avatar: String,
}

impl PersonaForm {
    /// Empty or `Custom` preset selects the custom fields
    pub fn into_source(self) -> PersonaSource {
        let custom_instructions = Some(self.custom_instructions);
        let avatar = Some(self.avatar);
        let preset = self.preset.trim();

        if preset.is_empty() || preset == CUSTOM_PRESET {
            PersonaSource::Custom(PersonaDefinition {
                name: self.name,
                personality: self.personality,
                topics: self.topics,
                communication_style: self.communication_style,
                language: self.language,
                custom_instructions,
                avatar,
            })
        } else {
            PersonaSource::Preset {
                name: preset.to_string(),
                custom_instructions,
                avatar,
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageForm {
    pub message: String,
}

/// Start a fresh session and send the browser to it
pub async fn index(State(state): State<AppState>) -> Redirect {
    let (id, _) = state.sessions.create();
    info!("[{id}] New chat session");
    Redirect::to(&session_path(&id))
}

pub async fn show_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let session = lookup(&state, &id)?;
    let guard = session.lock().await;
    Ok(render(&state, &guard, None, StatusCode::OK))
}

pub async fn set_persona(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<PersonaForm>,
) -> Result<Response, WebError> {
    let session = lookup(&state, &id)?;
    let mut guard = session.lock().await;

    match PromptBuilder::new(&state.presets, form.into_source()).build() {
        Ok(persona) => {
            info!(
                "[{id}] Persona applied: '{}' (preset: {:?})",
                persona.display_name(),
                persona.preset
            );
            guard.set_persona(persona);
            Ok(Redirect::to(&session_path(&guard.id())).into_response())
        }
        Err(e) => {
            info!("[{id}] Persona rejected: {e}");
            let status = persona_status(&e);
            Ok(render(&state, &guard, Some(format!("Persona not applied: {e}")), status))
        }
    }
}

pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> Result<Response, WebError> {
    let session = lookup(&state, &id)?;
    let mut guard = session.lock().await;

    if form.message.trim().is_empty() {
        debug!("[{id}] Ignoring blank message");
        return Ok(Redirect::to(&session_path(&guard.id())).into_response());
    }

    match guard.submit(state.gateway.as_ref(), &form.message).await {
        Ok(_) => Ok(Redirect::to(&format!("{}#bottom", session_path(&guard.id()))).into_response()),
        Err(e) => {
            let notice = if e.is_retryable() {
                format!("{e}. Your message was kept; send it again to retry.")
            } else {
                e.to_string()
            };
            Ok(render(&state, &guard, Some(notice), completion_status(&e)))
        }
    }
}

pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    let session = lookup(&state, &id)?;
    let mut guard = session.lock().await;
    guard.reset();
    info!("[{id}] Conversation reset");
    Ok(Redirect::to(&session_path(&guard.id())))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, WebError> {
    let session = lookup(&state, &id)?;
    let guard = session.lock().await;
    Ok(Json(guard.messages().to_vec()))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.gateway.model(),
        "sessions": state.sessions.len(),
    }))
}

fn lookup(state: &AppState, raw_id: &str) -> Result<SharedSession, WebError> {
    Uuid::parse_str(raw_id)
        .ok()
        .and_then(|id| state.sessions.get(&id))
        .ok_or_else(|| WebError::SessionNotFound(raw_id.to_string()))
}

fn session_path(id: &Uuid) -> String {
    format!("/session/{id}")
}

fn render(
    state: &AppState,
    session: &ChatSession,
    notice: Option<String>,
    status: StatusCode,
) -> Response {
    let session_id = session.id().to_string();
    let view = PageView {
        session_id: &session_id,
        messages: session.messages(),
        persona: session.persona(),
        presets: state.presets.names().collect(),
        model: state.gateway.model(),
        notice,
    };
    (status, Html(chat_page(&view))).into_response()
}
