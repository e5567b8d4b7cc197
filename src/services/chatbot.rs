// src/services/chatbot.rs
use anyhow::{Context, anyhow};
use serde_json::Value;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
};

pub const ECHO_PREFIX: &str = "Echo: ";

/// Builds the bot reply. The message is echoed as received, untrimmed.
pub fn generate_reply(message: &str) -> String {
    format!("{ECHO_PREFIX}{message}")
}

/// Decides whether a body with this `Content-Type` is parsed as JSON.
///
/// Only `application/json` (any case, any parameters) is parsed. Other types,
/// or no type at all, leave the document empty. A JSON type declaring a
/// non-UTF charset cannot be decoded and is an internal error.
pub fn accepts_json(content_type: Option<&str>) -> Result<bool, AppError> {
    let Some(content_type) = content_type else {
        return Ok(false);
    };

    let mut parts = content_type.split(';');
    let media_type = parts.next().unwrap_or_default().trim();
    if !media_type.eq_ignore_ascii_case("application/json") {
        return Ok(false);
    }

    for param in parts {
        if let Some((name, value)) = param.split_once('=') {
            if name.trim().eq_ignore_ascii_case("charset") {
                let charset = value.trim().trim_matches('"').to_ascii_lowercase();
                if !charset.starts_with("utf-") {
                    return Err(AppError::Internal(anyhow!(
                        "unsupported charset \"{charset}\""
                    )));
                }
            }
        }
    }

    Ok(true)
}

/// Parses a raw request body into a JSON document.
///
/// A zero-length body counts as `{}`. Only objects and arrays are accepted as
/// documents; anything else, whitespace-only bodies included, is an internal
/// error rather than a validation failure.
pub fn parse_body(body: &[u8]) -> Result<Value, AppError> {
    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }

    let value: Value = serde_json::from_slice(body).context("request body is not valid JSON")?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(AppError::Internal(anyhow!(
            "request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Extracts and validates the `message` field.
pub fn validate_request(body: &Value) -> Result<ChatRequest, AppError> {
    match body.get("message") {
        Some(Value::String(message)) if !is_blank(message) => Ok(ChatRequest {
            message: message.clone(),
        }),
        _ => Err(AppError::InvalidInput),
    }
}

/// U+FEFF counts as whitespace here, U+0085 does not.
fn is_blank(message: &str) -> bool {
    message
        .chars()
        .all(|c| c == '\u{FEFF}' || (c != '\u{0085}' && c.is_whitespace()))
}

/// Body bytes in, reply out. No state is read or written.
pub fn process_chat(body: &[u8]) -> Result<ChatResponse, AppError> {
    let document = parse_body(body)?;
    tracing::info!("Received request body: {document}");

    let request = validate_request(&document)?;
    let bot_message = generate_reply(&request.message);
    tracing::info!("Sending bot message: {bot_message}");

    Ok(ChatResponse { bot_message })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
