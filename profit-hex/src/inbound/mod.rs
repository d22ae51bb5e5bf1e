//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that a chat gateway drives: it posts user messages
//! and button presses and delivers the returned messages.

mod handlers;
mod rate_limit;
mod server;

pub use rate_limit::RateLimiterState;
pub use server::HttpServer;
