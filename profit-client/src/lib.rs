//! # Profit Client SDK
//!
//! A typed Rust client for the profit calculator bot API.

use profit_types::{
    CallbackRequest, ConversationSnapshot, MessageRequest, OutboundMessage, RepliesResponse,
    UserId,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Profit calculator API client.
pub struct ProfitClient {
    base_url: String,
    http: Client,
}

impl ProfitClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Sends a text message on behalf of a user.
    pub async fn send_message(
        &self,
        user_id: UserId,
        text: &str,
    ) -> Result<Vec<OutboundMessage>, ClientError> {
        let req = MessageRequest {
            user_id,
            chat_id: None,
            text: text.to_string(),
        };
        let resp: RepliesResponse = self.post("/api/messages", &req).await?;
        Ok(resp.messages)
    }

    /// Presses a button on behalf of a user.
    pub async fn press_button(
        &self,
        user_id: UserId,
        data: &str,
    ) -> Result<Vec<OutboundMessage>, ClientError> {
        let req = CallbackRequest {
            user_id,
            chat_id: None,
            data: data.to_string(),
        };
        let resp: RepliesResponse = self.post("/api/callbacks", &req).await?;
        Ok(resp.messages)
    }

    /// Gets a user's current conversation.
    pub async fn conversation(&self, user_id: UserId) -> Result<ConversationSnapshot, ClientError> {
        self.get(&format!("/api/conversations/{}", user_id)).await
    }

    /// Drops a user's conversation.
    pub async fn reset_conversation(&self, user_id: UserId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(format!("{}/api/conversations/{}", self.base_url, user_id))
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(api_error(status, resp).await)
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(status, resp).await)
        }
    }
}

async fn api_error(status: reqwest::StatusCode, resp: reqwest::Response) -> ClientError {
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ProfitClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = ProfitClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
