//! Domain models for the profit calculator.

pub mod amount;
pub mod calculation;
pub mod command;
pub mod conversation;
pub mod user;

pub use amount::{PositiveAmount, format_decimal, round_to};
pub use calculation::CalculationResult;
pub use command::Command;
pub use conversation::{Conversation, ConversationState, Outcome, Stage, Transition};
pub use user::UserId;
