//! # Profit Repository
//!
//! Concrete store implementations (adapters) for the profit calculator bot.
//! This crate provides the adapters behind the `ConversationStore` and
//! `SeenUsersStore` ports.

pub mod memory;
pub mod seen_users;

#[cfg(test)]
mod store_tests;

pub use memory::InMemoryConversationStore;
pub use seen_users::JsonSeenUsersStore;
