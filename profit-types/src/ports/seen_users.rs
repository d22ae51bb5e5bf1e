//! Greeting store port.
//!
//! Remembers which users have already received the welcome message.

use crate::domain::UserId;
use crate::error::StoreError;

#[async_trait::async_trait]
pub trait SeenUsersStore: Send + Sync + 'static {
    /// Marks the user as greeted. Returns `true` if they were not marked yet.
    async fn mark_seen(&self, user_id: UserId) -> Result<bool, StoreError>;
}
