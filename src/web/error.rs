//! HTTP error mapping for the chat surface

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::warn;
use thiserror::Error;

use super::render;
use crate::features::completion::CompletionError;
use crate::features::personas::PersonaError;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("session not found: {0}")]
    SessionNotFound(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::SessionNotFound(id) => {
                warn!("Request for unknown session '{id}'");
                (StatusCode::NOT_FOUND, Html(render::not_found_page())).into_response()
            }
        }
    }
}

/// Status for a page re-rendered after a failed completion
pub fn completion_status(err: &CompletionError) -> StatusCode {
    match err {
        CompletionError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        CompletionError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        CompletionError::Service(_) | CompletionError::EmptyResponse => StatusCode::BAD_GATEWAY,
    }
}

pub fn persona_status(err: &PersonaError) -> StatusCode {
    match err {
        PersonaError::UnknownPreset(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}
