//! # Profit Hex
//!
//! Application service layer and HTTP adapter for the profit calculator bot.
//!
//! ## Architecture
//!
//! - `service/` - Bot service (routes commands and text through the state machine)
//! - `replies/` - User-facing message texts
//! - `inbound/` - HTTP adapter (Axum server) standing in for the chat transport
//!
//! The service is generic over `C: ConversationStore` and `S: SeenUsersStore`,
//! allowing different store implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod replies;
pub mod service;


pub use service::BotService;
