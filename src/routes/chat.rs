use anyhow::Context;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderMap, header},
};

use crate::{
    error::AppError,
    message::ChatResponse,
    services::chatbot::{accepts_json, process_chat},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<ChatResponse>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    // Non-JSON bodies are never read; they leave the document empty.
    if !accepts_json(content_type)? {
        return Ok(Json(process_chat(&[])?));
    }

    // Over-limit bodies land here too and are reported as internal errors.
    let bytes = axum::body::to_bytes(body, state.body_limit)
        .await
        .context("failed to read request body")?;

    let response = process_chat(&bytes)?;
    Ok(Json(response))
}
