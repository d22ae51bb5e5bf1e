//! Bot Application Service
//!
//! Routes inbound chat events through the calculator state machine and
//! turns the outcome into outbound messages.
//! Contains NO transport logic - pure conversation orchestration.

use profit_types::{
    AppError, Command, Conversation, ConversationSnapshot, ConversationStore, OutboundMessage,
    Outcome, SeenUsersStore, UserId,
};

use crate::replies;

/// Application service for the calculator bot.
///
/// Generic over `C: ConversationStore` and `S: SeenUsersStore` - the adapters
/// are injected at compile time, so the service can be tested without any
/// transport or file system.
pub struct BotService<C: ConversationStore, S: SeenUsersStore> {
    conversations: C,
    seen_users: S,
}

impl<C: ConversationStore, S: SeenUsersStore> BotService<C, S> {
    /// Creates a new bot service with the given stores.
    pub fn new(conversations: C, seen_users: S) -> Self {
        Self {
            conversations,
            seen_users,
        }
    }

    /// Returns a reference to the conversation store.
    pub fn conversations(&self) -> &C {
        &self.conversations
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Inbound events
    // ─────────────────────────────────────────────────────────────────────────────

    /// Handles a text message. Slash commands are dispatched to
    /// [`Self::on_command`]; anything else is input for the state machine.
    pub async fn on_message(
        &self,
        user_id: UserId,
        chat_id: i64,
        text: &str,
    ) -> Result<Vec<OutboundMessage>, AppError> {
        if let Some(command) = Command::parse(text) {
            return self.on_command(user_id, chat_id, command).await;
        }
        Ok(self.advance(user_id, chat_id, text))
    }

    /// Handles an explicit command.
    pub async fn on_command(
        &self,
        user_id: UserId,
        chat_id: i64,
        command: Command,
    ) -> Result<Vec<OutboundMessage>, AppError> {
        tracing::debug!(%user_id, ?command, "Command received");

        match command {
            Command::Start => {
                let mut messages = Vec::with_capacity(2);
                if self.seen_users.mark_seen(user_id).await? {
                    tracing::info!(%user_id, "Greeting new user");
                    messages.push(OutboundMessage::html(chat_id, replies::WELCOME));
                }
                messages.push(replies::menu(chat_id));
                Ok(messages)
            }
            Command::StartCalculation => Ok(self.start_calculation(user_id, chat_id)),
            Command::Cancel => {
                let outcome = self.conversations.update(user_id, |conversation| {
                    let transition = conversation.cancel();
                    *conversation = transition.next;
                    transition.outcome
                });
                Ok(replies::render(chat_id, &outcome))
            }
            Command::ChatId => Ok(vec![OutboundMessage::html(
                chat_id,
                replies::chat_id(chat_id),
            )]),
        }
    }

    /// Handles a button press. Unknown payloads are ignored.
    pub async fn on_callback(
        &self,
        user_id: UserId,
        chat_id: i64,
        data: &str,
    ) -> Result<Vec<OutboundMessage>, AppError> {
        match Command::from_callback(data) {
            Some(command) => self.on_command(user_id, chat_id, command).await,
            None => {
                tracing::debug!(%user_id, data, "Ignoring unknown callback");
                Ok(Vec::new())
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // State machine steps
    // ─────────────────────────────────────────────────────────────────────────────

    /// Starts a fresh calculation for the user, discarding any pending one.
    pub fn start_calculation(&self, user_id: UserId, chat_id: i64) -> Vec<OutboundMessage> {
        let transition = Conversation::start();
        self.conversations.set(user_id, transition.next);
        replies::render(chat_id, &transition.outcome)
    }

    /// Feeds one text input to the user's conversation.
    ///
    /// The read, transition and write happen under one store update, so two
    /// messages from the same user cannot interleave.
    pub fn advance(&self, user_id: UserId, chat_id: i64, text: &str) -> Vec<OutboundMessage> {
        let outcome = self.conversations.update(user_id, |conversation| {
            let transition = conversation.accept(text);
            *conversation = transition.next;
            transition.outcome
        });

        match &outcome {
            Outcome::Rejected { stage, reason } => {
                tracing::debug!(%user_id, ?stage, %reason, "Input rejected");
            }
            Outcome::Failed { stage, error } => {
                tracing::debug!(%user_id, ?stage, %error, "Calculation failed");
            }
            Outcome::Completed(result) => {
                tracing::info!(
                    %user_id,
                    units_sold = result.units_sold,
                    profit = result.profit,
                    "Calculation completed"
                );
            }
            _ => {}
        }

        replies::render(chat_id, &outcome)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversation inspection
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the user's current conversation.
    pub fn snapshot(&self, user_id: UserId) -> ConversationSnapshot {
        ConversationSnapshot::new(user_id, &self.conversations.get(user_id))
    }

    /// Replaces the user's conversation with a previously exported snapshot.
    ///
    /// A snapshot whose fields contradict its state resets the conversation
    /// to idle instead of failing.
    pub fn restore(&self, snapshot: &ConversationSnapshot) -> ConversationSnapshot {
        let user_id = snapshot.user_id;
        let conversation = match snapshot.to_conversation() {
            Ok(conversation) => conversation,
            Err(error) => {
                tracing::warn!(%user_id, %error, "Resetting inconsistent conversation");
                Conversation::Idle
            }
        };
        self.conversations.set(user_id, conversation);
        ConversationSnapshot::new(user_id, &conversation)
    }

    /// Silently drops the user's conversation.
    pub fn reset(&self, user_id: UserId) {
        self.conversations.clear(user_id);
    }

    /// Number of users with a calculation in progress.
    pub fn active_conversations(&self) -> usize {
        self.conversations.active_conversations()
    }
}
