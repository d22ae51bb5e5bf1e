//! # Profit Types
//!
//! Domain types, the calculator state machine and port traits for the
//! profit calculator bot. This crate has ZERO IO dependencies - only data
//! structures, business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (UserId, PositiveAmount, Conversation, CalculationResult)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for the transport boundary
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CalculationResult, Command, Conversation, ConversationState, Outcome, PositiveAmount, Stage,
    Transition, UserId, format_decimal, round_to,
};
pub use dto::*;
pub use error::{AppError, DomainError, StoreError, ValidationError};
pub use ports::{ConversationStore, SeenUsersStore};
