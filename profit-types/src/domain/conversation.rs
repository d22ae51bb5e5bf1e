//! Per-user conversation and the calculator state machine.
//!
//! Each state carries exactly the inputs collected so far, so a rate can
//! never be read before it has been entered. Transitions are pure: they take
//! the current conversation by value and return the next one together with
//! an [`Outcome`] describing what the user should be told.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::amount::PositiveAmount;
use super::calculation::CalculationResult;
use crate::error::{DomainError, ValidationError};

/// Where a user is in the calculation flow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Conversation {
    /// No pending calculation.
    #[default]
    Idle,
    AwaitingAmount,
    AwaitingSellRate {
        eur_amount: PositiveAmount,
    },
    AwaitingBuyRate {
        eur_amount: PositiveAmount,
        sell_rate: PositiveAmount,
    },
}

/// Data-free tag of a [`Conversation`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Idle,
    AwaitingAmount,
    AwaitingSellRate,
    AwaitingBuyRate,
}

/// The input a conversation is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Amount,
    SellRate,
    BuyRate,
}

/// What happened on a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Input accepted (or flow started); ask for the given stage next.
    Prompt(Stage),
    /// Input did not validate; the stage is asked again.
    Rejected {
        stage: Stage,
        reason: ValidationError,
    },
    /// Input validated but the calculation could not be completed.
    Failed { stage: Stage, error: DomainError },
    /// All three inputs collected.
    Completed(CalculationResult),
    /// Pending calculation dropped. `pending` is false if there was nothing to drop.
    Cancelled { pending: bool },
    /// Text received while idle; nothing to do.
    Ignored,
}

/// Result of feeding one event to a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: Conversation,
    pub outcome: Outcome,
}

impl Transition {
    fn new(next: Conversation, outcome: Outcome) -> Self {
        Self { next, outcome }
    }
}

impl Conversation {
    /// Begins a fresh calculation, discarding anything collected before.
    pub fn start() -> Transition {
        Transition::new(Conversation::AwaitingAmount, Outcome::Prompt(Stage::Amount))
    }

    /// Drops any pending calculation.
    pub fn cancel(self) -> Transition {
        Transition::new(
            Conversation::Idle,
            Outcome::Cancelled {
                pending: !self.is_idle(),
            },
        )
    }

    /// Feeds one text input to the conversation.
    ///
    /// Invalid input leaves the conversation exactly as it was.
    pub fn accept(self, text: &str) -> Transition {
        let Some(stage) = self.stage() else {
            return Transition::new(self, Outcome::Ignored);
        };

        let value = match PositiveAmount::parse(text) {
            Ok(value) => value,
            Err(reason) => return Transition::new(self, Outcome::Rejected { stage, reason }),
        };

        match self {
            Conversation::Idle => Transition::new(self, Outcome::Ignored),
            Conversation::AwaitingAmount => Transition::new(
                Conversation::AwaitingSellRate { eur_amount: value },
                Outcome::Prompt(Stage::SellRate),
            ),
            Conversation::AwaitingSellRate { eur_amount } => Transition::new(
                Conversation::AwaitingBuyRate {
                    eur_amount,
                    sell_rate: value,
                },
                Outcome::Prompt(Stage::BuyRate),
            ),
            Conversation::AwaitingBuyRate {
                eur_amount,
                sell_rate,
            } => match CalculationResult::compute(eur_amount, sell_rate, value) {
                Ok(result) => Transition::new(Conversation::Idle, Outcome::Completed(result)),
                Err(error) => Transition::new(self, Outcome::Failed { stage, error }),
            },
        }
    }

    /// The input this conversation is waiting for, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Conversation::Idle => None,
            Conversation::AwaitingAmount => Some(Stage::Amount),
            Conversation::AwaitingSellRate { .. } => Some(Stage::SellRate),
            Conversation::AwaitingBuyRate { .. } => Some(Stage::BuyRate),
        }
    }

    pub fn state(&self) -> ConversationState {
        match self {
            Conversation::Idle => ConversationState::Idle,
            Conversation::AwaitingAmount => ConversationState::AwaitingAmount,
            Conversation::AwaitingSellRate { .. } => ConversationState::AwaitingSellRate,
            Conversation::AwaitingBuyRate { .. } => ConversationState::AwaitingBuyRate,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Conversation::Idle)
    }

    pub fn eur_amount(&self) -> Option<PositiveAmount> {
        match self {
            Conversation::AwaitingSellRate { eur_amount }
            | Conversation::AwaitingBuyRate { eur_amount, .. } => Some(*eur_amount),
            _ => None,
        }
    }

    pub fn sell_rate(&self) -> Option<PositiveAmount> {
        match self {
            Conversation::AwaitingBuyRate { sell_rate, .. } => Some(*sell_rate),
            _ => None,
        }
    }

    /// Rebuilds a conversation from its flat representation.
    ///
    /// Fails with [`DomainError::StateInconsistency`] when the fields do not
    /// match the state, e.g. `AwaitingBuyRate` without a stored amount, or an
    /// amount present while idle.
    pub fn from_parts(
        state: ConversationState,
        eur_amount: Option<PositiveAmount>,
        sell_rate: Option<PositiveAmount>,
    ) -> Result<Self, DomainError> {
        match (state, eur_amount, sell_rate) {
            (ConversationState::Idle, None, None) => Ok(Conversation::Idle),
            (ConversationState::AwaitingAmount, None, None) => Ok(Conversation::AwaitingAmount),
            (ConversationState::AwaitingSellRate, Some(eur_amount), None) => {
                Ok(Conversation::AwaitingSellRate { eur_amount })
            }
            (ConversationState::AwaitingBuyRate, Some(eur_amount), Some(sell_rate)) => {
                Ok(Conversation::AwaitingBuyRate {
                    eur_amount,
                    sell_rate,
                })
            }
            (state, eur_amount, sell_rate) => Err(DomainError::StateInconsistency(format!(
                "{state:?} with eur_amount={} sell_rate={}",
                describe(eur_amount),
                describe(sell_rate),
            ))),
        }
    }
}

fn describe(value: Option<PositiveAmount>) -> String {
    value.map_or_else(|| "unset".to_string(), |v| v.to_string())
}
