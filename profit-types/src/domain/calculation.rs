//! Profit calculation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::amount::{PositiveAmount, round_to};
use crate::error::DomainError;

/// Decimal places kept for the number of units sold.
pub const UNITS_SOLD_PLACES: usize = 2;
/// Decimal places kept for the profit figure.
pub const PROFIT_PLACES: usize = 4;

/// Outcome of one completed calculation. Derived on the final step, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculationResult {
    /// Order amount in EUR
    pub amount: PositiveAmount,
    pub sell_rate: PositiveAmount,
    pub buy_rate: PositiveAmount,
    /// `amount / sell_rate`, rounded to 2 places
    pub units_sold: f64,
    /// `(amount - units_sold * buy_rate) / buy_rate`, rounded to 4 places
    pub profit: f64,
}

impl CalculationResult {
    /// Computes units sold and profit.
    ///
    /// The profit term divides by the buy rate. Fails only if the arithmetic
    /// leaves the finite range (e.g. `1e308 / 1e-308`).
    pub fn compute(
        amount: PositiveAmount,
        sell_rate: PositiveAmount,
        buy_rate: PositiveAmount,
    ) -> Result<Self, DomainError> {
        let units_sold = round_to(amount.get() / sell_rate.get(), UNITS_SOLD_PLACES);
        let profit = round_to(
            (amount.get() - units_sold * buy_rate.get()) / buy_rate.get(),
            PROFIT_PLACES,
        );

        if !units_sold.is_finite() || !profit.is_finite() {
            return Err(DomainError::NonFiniteResult);
        }

        Ok(Self {
            amount,
            sell_rate,
            buy_rate,
            units_sold,
            profit,
        })
    }
}
