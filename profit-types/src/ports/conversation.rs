//! Conversation store port.
//!
//! Holds the current [`Conversation`] of every user. Adapters must keep
//! different users independent and make `update` atomic per user.

use crate::domain::{Conversation, UserId};

/// Per-user conversation storage.
///
/// Synchronous: every operation is a short in-memory step and the
/// state machine never waits on it.
pub trait ConversationStore: Send + Sync + 'static {
    /// Current conversation, or [`Conversation::Idle`] if the user has none.
    fn get(&self, user_id: UserId) -> Conversation;

    /// Replaces the user's conversation.
    fn set(&self, user_id: UserId, conversation: Conversation);

    /// Resets the user to idle, discarding collected data.
    fn clear(&self, user_id: UserId);

    /// Atomically reads and rewrites one user's conversation.
    ///
    /// No other operation on the same user may observe the conversation
    /// while `f` runs.
    fn update<T, F>(&self, user_id: UserId, f: F) -> T
    where
        F: FnOnce(&mut Conversation) -> T;

    /// Number of users with a calculation in progress.
    fn active_conversations(&self) -> usize;
}
