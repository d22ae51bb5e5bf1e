//! User-facing message texts.
//!
//! Everything the bot says lives here so the service only decides *which*
//! reply to send.

use profit_types::domain::command::CALC_PROFIT_CALLBACK;
use profit_types::domain::calculation::{PROFIT_PLACES, UNITS_SOLD_PLACES};
use profit_types::{CalculationResult, OutboundMessage, Outcome, Stage, format_decimal};

/// Decimal places used when echoing amounts and rates back.
const INPUT_PLACES: usize = 4;

pub const WELCOME: &str = "👋 Hi! This is <b>Profit Calculator</b>, a quick calculator for \
arbitrage orders.\n\n\
⚙️ It stores nothing: each calculation lives only until you get the result.\n\n\
💬 Ideas or feedback are always welcome 🙌";

pub const MENU: &str =
    "Give me an amount and two rates and I'll show the profit.\n\nPress the button 👇";

pub const CALC_BUTTON: &str = "📊 Calculate profit";

pub const CANCELLED: &str = "❌ Calculation cancelled.";
pub const NOTHING_TO_CANCEL: &str = "Nothing to cancel. Press the button to start 👇";

/// Prompt asking for the given input.
pub fn prompt(stage: Stage) -> &'static str {
    match stage {
        Stage::Amount => "💶 Enter the amount in EUR:",
        Stage::SellRate => "💱 Enter the sell rate:",
        Stage::BuyRate => "📉 Enter the buy rate:",
    }
}

/// Message sent when input for the given stage is rejected.
pub fn invalid(stage: Stage) -> &'static str {
    match stage {
        Stage::Amount => "⚠️ Enter a number, for example 1050.5",
        Stage::SellRate => "⚠️ The rate must be a positive number!",
        Stage::BuyRate => "⚠️ Check the number and try again.",
    }
}

pub fn chat_id(chat_id: i64) -> String {
    format!("🆔 Chat ID: <code>{chat_id}</code>")
}

/// HTML summary of a finished calculation.
pub fn result(result: &CalculationResult) -> String {
    format!(
        "✅ Order: <b>{} EUR</b>\n\
         🏷️ Sell rate: <b>{}</b>\n\
         📉 Buy rate: <b>{}</b>\n\n\
         🔁 USDT sold: <b>{} USDT</b>\n\
         💰 Profit: <b>{} USDT</b>",
        format_decimal(result.amount.get(), INPUT_PLACES),
        format_decimal(result.sell_rate.get(), INPUT_PLACES),
        format_decimal(result.buy_rate.get(), INPUT_PLACES),
        format_decimal(result.units_sold, UNITS_SOLD_PLACES),
        format_decimal(result.profit, PROFIT_PLACES),
    )
}

/// Main menu with the "calculate profit" button.
pub fn menu(chat_id: i64) -> OutboundMessage {
    OutboundMessage::plain(chat_id, MENU).with_button(CALC_BUTTON, CALC_PROFIT_CALLBACK)
}

/// Messages for a state machine outcome.
pub fn render(chat_id: i64, outcome: &Outcome) -> Vec<OutboundMessage> {
    match outcome {
        Outcome::Prompt(stage) => vec![OutboundMessage::plain(chat_id, prompt(*stage))],
        Outcome::Rejected { stage, .. } | Outcome::Failed { stage, .. } => {
            vec![OutboundMessage::plain(chat_id, invalid(*stage))]
        }
        Outcome::Completed(calculation) => vec![OutboundMessage::html(chat_id, result(calculation))],
        Outcome::Cancelled { pending: true } => vec![OutboundMessage::plain(chat_id, CANCELLED)],
        Outcome::Cancelled { pending: false } => vec![
            OutboundMessage::plain(chat_id, NOTHING_TO_CANCEL)
                .with_button(CALC_BUTTON, CALC_PROFIT_CALLBACK),
        ],
        Outcome::Ignored => Vec::new(),
    }
}
