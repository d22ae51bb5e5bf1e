//! Data Transfer Objects (DTOs) for the transport boundary.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Conversation, ConversationState, PositiveAmount, UserId};
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Inbound
// ─────────────────────────────────────────────────────────────────────────────

/// A text message written by a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageRequest {
    /// Platform identifier of the sender
    #[schema(example = 123456789)]
    pub user_id: UserId,
    /// Chat the message arrived in; defaults to the sender's private chat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    /// Raw message text
    #[schema(example = "1 050,5")]
    pub text: String,
}

/// A button press.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallbackRequest {
    #[schema(example = 123456789)]
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    /// Callback payload of the pressed button
    #[schema(example = "calc_profit")]
    pub data: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Outbound
// ─────────────────────────────────────────────────────────────────────────────

/// Inline button attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Button {
    /// Label shown to the user
    pub text: String,
    /// Payload sent back in a [`CallbackRequest`] when pressed
    pub callback_data: String,
}

/// A message the transport must deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
    /// True if `text` carries HTML markup
    pub formatted: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

impl OutboundMessage {
    /// Plain text message.
    pub fn plain(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            formatted: false,
            buttons: Vec::new(),
        }
    }

    /// HTML-formatted message.
    pub fn html(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            formatted: true,
            ..Self::plain(chat_id, text)
        }
    }

    pub fn with_button(mut self, text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        self.buttons.push(Button {
            text: text.into(),
            callback_data: callback_data.into(),
        });
        self
    }
}

/// Messages produced in reply to one inbound event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RepliesResponse {
    pub messages: Vec<OutboundMessage>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversation snapshots
// ─────────────────────────────────────────────────────────────────────────────

/// Flat view of one user's conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversationSnapshot {
    pub user_id: UserId,
    pub state: ConversationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eur_amount: Option<PositiveAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_rate: Option<PositiveAmount>,
}

impl ConversationSnapshot {
    pub fn new(user_id: UserId, conversation: &Conversation) -> Self {
        Self {
            user_id,
            state: conversation.state(),
            eur_amount: conversation.eur_amount(),
            sell_rate: conversation.sell_rate(),
        }
    }

    /// Rebuilds the conversation, failing if the fields contradict the state.
    pub fn to_conversation(&self) -> Result<Conversation, DomainError> {
        Conversation::from_parts(self.state, self.eur_amount, self.sell_rate)
    }
}
