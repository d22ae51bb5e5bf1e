//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use profit_types::domain::{ConversationState, PositiveAmount, UserId};
use profit_types::dto::{
    Button, CallbackRequest, ConversationSnapshot, MessageRequest, OutboundMessage,
    RepliesResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy", "active_conversations": 0}))
    )
)]
async fn health() {}

/// Deliver a user's text message
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "chat",
    request_body = MessageRequest,
    responses(
        (status = 200, description = "Messages to send back", body = RepliesResponse),
        (status = 429, description = "Per-user rate limit exceeded")
    )
)]
async fn post_message() {}

/// Deliver a button press
#[utoipa::path(
    post,
    path = "/api/callbacks",
    tag = "chat",
    request_body = CallbackRequest,
    responses(
        (status = 200, description = "Messages to send back", body = RepliesResponse),
        (status = 429, description = "Per-user rate limit exceeded")
    )
)]
async fn post_callback() {}

/// Inspect a user's conversation
#[utoipa::path(
    get,
    path = "/api/conversations/{user_id}",
    tag = "conversations",
    params(("user_id" = i64, Path, description = "Chat user ID")),
    responses(
        (status = 200, description = "Current conversation", body = ConversationSnapshot),
        (status = 400, description = "Invalid user ID")
    )
)]
async fn get_conversation() {}

/// Restore a user's conversation
#[utoipa::path(
    put,
    path = "/api/conversations/{user_id}",
    tag = "conversations",
    params(("user_id" = i64, Path, description = "Chat user ID")),
    request_body = ConversationSnapshot,
    responses(
        (status = 200, description = "Restored conversation, or idle if the snapshot was inconsistent", body = ConversationSnapshot),
        (status = 400, description = "Invalid user ID or mismatched snapshot")
    )
)]
async fn put_conversation() {}

/// Drop a user's conversation
#[utoipa::path(
    delete,
    path = "/api/conversations/{user_id}",
    tag = "conversations",
    params(("user_id" = i64, Path, description = "Chat user ID")),
    responses(
        (status = 204, description = "Conversation cleared"),
        (status = 400, description = "Invalid user ID")
    )
)]
async fn delete_conversation() {}

/// OpenAPI documentation for the calculator bot API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Profit Calculator Bot API",
        version = "1.0.0",
        description = "Chat gateway interface of the profit calculator bot.\n\nPost each user message or button press and deliver the returned messages. `formatted` messages carry HTML markup.",
        license(name = "MIT"),
    ),
    paths(
        health,
        post_message,
        post_callback,
        get_conversation,
        put_conversation,
        delete_conversation,
    ),
    components(
        schemas(
            MessageRequest,
            CallbackRequest,
            OutboundMessage,
            Button,
            RepliesResponse,
            ConversationSnapshot,
            ConversationState,
            PositiveAmount,
            UserId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "chat", description = "Inbound chat events"),
        (name = "conversations", description = "Conversation inspection and restore"),
    )
)]
pub struct ApiDoc;
