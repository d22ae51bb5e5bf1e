//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod conversation;
mod seen_users;

pub use conversation::ConversationStore;
pub use seen_users::SeenUsersStore;
