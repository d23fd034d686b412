use crate::error::ChatError;
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use super::{AppState, ChatBody, ClearSessionBody};

fn error_response(error: &ChatError) -> (StatusCode, Json<serde_json::Value>) {
    let status = if error.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let body = serde_json::json!({
        "error": error.user_message(),
        "code": error.code(),
    });
    (status, Json(body))
}

fn parse_body<T>(body: Result<Json<T>, JsonRejection>, route: &str) -> Result<T, ChatError> {
    body.map(|Json(parsed)| parsed).map_err(|rejection| {
        tracing::debug!(route, "rejected body: {rejection}");
        ChatError::InvalidBody(rejection.body_text())
    })
}

/// GET /health
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let body = serde_json::json!({
        "status": "ok",
        "provider": state.chat.provider_name(),
        "mode": state.chat.settings().mode.to_string(),
    });
    Json(body)
}

/// POST /chat
pub(super) async fn handle_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> impl IntoResponse {
    let body = match parse_body(body, "/chat") {
        Ok(body) => body,
        Err(error) => return error_response(&error),
    };

    match state
        .chat
        .ask(body.question.as_deref(), body.session_id.as_deref())
        .await
    {
        Ok(response) => (
            StatusCode::OK,
            Json(serde_json::json!({ "response": response })),
        ),
        Err(error) => error_response(&error),
    }
}

/// POST /session/clear
pub(super) async fn handle_clear_session(
    State(state): State<AppState>,
    body: Result<Json<ClearSessionBody>, JsonRejection>,
) -> impl IntoResponse {
    let body = match parse_body(body, "/session/clear") {
        Ok(body) => body,
        Err(error) => return error_response(&error),
    };

    match state.chat.clear(body.session_id.as_deref()).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "ok": true }))),
        Err(error) => error_response(&error),
    }
}
