//! Bot commands and button payloads.

/// Callback payload carried by the "calculate profit" button.
pub const CALC_PROFIT_CALLBACK: &str = "calc_profit";

/// Explicit requests a user can make besides entering numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start`: greeting and main menu
    Start,
    /// `/calc` or the menu button: begin a new calculation
    StartCalculation,
    /// `/cancel`: drop the pending calculation
    Cancel,
    /// `/chatid`: report the chat identifier
    ChatId,
}

impl Command {
    /// Recognises a slash command in a text message.
    ///
    /// Only the first word counts and a `@botname` suffix is ignored, so
    /// `/start@profit_bot hello` is `Start`. Unknown commands return `None`
    /// and are treated as ordinary input.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Command::Start),
            "calc" => Some(Command::StartCalculation),
            "cancel" => Some(Command::Cancel),
            "chatid" => Some(Command::ChatId),
            _ => None,
        }
    }

    /// Maps a button callback payload to a command.
    pub fn from_callback(data: &str) -> Option<Self> {
        match data {
            CALC_PROFIT_CALLBACK => Some(Command::StartCalculation),
            _ => None,
        }
    }
}
