//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use profit_types::{
    AppError, CallbackRequest, ConversationSnapshot, ConversationStore, MessageRequest,
    RepliesResponse, SeenUsersStore, UserId,
};

use super::rate_limit::{RETRY_AFTER_SECONDS, RateLimiterState};
use crate::BotService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<C: ConversationStore, S: SeenUsersStore> {
    pub service: BotService<C, S>,
    pub rate_limiter: RateLimiterState,
}

impl<C: ConversationStore, S: SeenUsersStore> AppState<C, S> {
    fn throttle(&self, user_id: UserId) -> Result<(), ApiError> {
        if self.rate_limiter.check(user_id) {
            Ok(())
        } else {
            tracing::warn!(%user_id, "Rate limit exceeded");
            Err(AppError::TooManyRequests.into())
        }
    }
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::TooManyRequests => {
                let body = serde_json::json!({
                    "error": "Rate limit exceeded. Please try again later.",
                    "code": StatusCode::TOO_MANY_REQUESTS.as_u16(),
                    "retry_after_seconds": RETRY_AFTER_SECONDS
                });
                return (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid user ID: {raw}")).into())
}

/// Health check endpoint.
pub async fn health<C: ConversationStore, S: SeenUsersStore>(
    State(state): State<Arc<AppState<C, S>>>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "active_conversations": state.service.active_conversations()
    }))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Handle a text message from a user.
#[tracing::instrument(skip(state, req), fields(user_id = %req.user_id))]
pub async fn post_message<C: ConversationStore, S: SeenUsersStore>(
    State(state): State<Arc<AppState<C, S>>>,
    Json(req): Json<MessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.throttle(req.user_id)?;

    let chat_id = req.chat_id.unwrap_or(req.user_id.get());
    let messages = state
        .service
        .on_message(req.user_id, chat_id, &req.text)
        .await?;
    Ok(Json(RepliesResponse { messages }))
}

/// Handle a button press.
#[tracing::instrument(skip(state, req), fields(user_id = %req.user_id, data = %req.data))]
pub async fn post_callback<C: ConversationStore, S: SeenUsersStore>(
    State(state): State<Arc<AppState<C, S>>>,
    Json(req): Json<CallbackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.throttle(req.user_id)?;

    let chat_id = req.chat_id.unwrap_or(req.user_id.get());
    let messages = state
        .service
        .on_callback(req.user_id, chat_id, &req.data)
        .await?;
    Ok(Json(RepliesResponse { messages }))
}

/// Get a user's current conversation.
#[tracing::instrument(skip(state))]
pub async fn get_conversation<C: ConversationStore, S: SeenUsersStore>(
    State(state): State<Arc<AppState<C, S>>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    Ok(Json(state.service.snapshot(user_id)))
}

/// Restore a user's conversation from a snapshot.
#[tracing::instrument(skip(state, snapshot))]
pub async fn put_conversation<C: ConversationStore, S: SeenUsersStore>(
    State(state): State<Arc<AppState<C, S>>>,
    Path(user_id): Path<String>,
    Json(snapshot): Json<ConversationSnapshot>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    if snapshot.user_id != user_id {
        return Err(AppError::BadRequest(format!(
            "Snapshot belongs to user {}, not {user_id}",
            snapshot.user_id
        ))
        .into());
    }

    Ok(Json(state.service.restore(&snapshot)))
}

/// Drop a user's conversation without notifying them.
#[tracing::instrument(skip(state))]
pub async fn delete_conversation<C: ConversationStore, S: SeenUsersStore>(
    State(state): State<Arc<AppState<C, S>>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    state.service.reset(user_id);
    Ok(StatusCode::NO_CONTENT)
}
