//! Profit CLI
//!
//! Command-line chat client for the profit calculator bot API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use profit_client::ProfitClient;
use profit_types::{OutboundMessage, UserId};

#[derive(Parser)]
#[command(name = "profit")]
#[command(author, version, about = "Profit calculator bot CLI client", long_about = None)]
struct Cli {
    /// Base URL of the bot API
    #[arg(long, env = "PROFIT_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the bot interactively
    Chat {
        /// Chat user ID to act as
        #[arg(long, default_value_t = 1)]
        user: i64,
    },
    /// Send a single text message
    Send {
        #[arg(long, default_value_t = 1)]
        user: i64,
        /// Message text
        text: String,
    },
    /// Press a button
    Press {
        #[arg(long, default_value_t = 1)]
        user: i64,
        /// Callback data of the button
        data: String,
    },
    /// Show a user's conversation state
    State {
        #[arg(long, default_value_t = 1)]
        user: i64,
    },
    /// Drop a user's conversation
    Reset {
        #[arg(long, default_value_t = 1)]
        user: i64,
    },
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ProfitClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }
        Commands::Send { user, text } => {
            let messages = client.send_message(UserId::new(user), &text).await?;
            print_messages(&messages);
        }
        Commands::Press { user, data } => {
            let messages = client.press_button(UserId::new(user), &data).await?;
            print_messages(&messages);
        }
        Commands::State { user } => {
            let snapshot = client.conversation(UserId::new(user)).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Reset { user } => {
            client.reset_conversation(UserId::new(user)).await?;
            println!("✓ Conversation cleared");
        }
        Commands::Chat { user } => chat(&client, UserId::new(user)).await?,
    }

    Ok(())
}

/// Reads lines from stdin until EOF. `!data` presses a button, anything
/// else is sent as a message.
async fn chat(client: &ProfitClient, user_id: UserId) -> Result<()> {
    println!("Chatting as user {user_id}. Type /start to begin, !<data> to press a button, Ctrl+D to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = match line.strip_prefix('!') {
            Some(data) => client.press_button(user_id, data.trim()).await,
            None => client.send_message(user_id, line).await,
        };

        match result {
            Ok(messages) => print_messages(&messages),
            Err(e) => eprintln!("✗ {e}"),
        }
    }

    Ok(())
}

fn print_messages(messages: &[OutboundMessage]) {
    for message in messages {
        println!("{}\n", render_for_terminal(message));
    }
}

/// Plain-text rendering of a bot message, buttons listed as `[data] label`.
fn render_for_terminal(message: &OutboundMessage) -> String {
    let mut out = if message.formatted {
        strip_html(&message.text)
    } else {
        message.text.clone()
    };
    for button in &message.buttons {
        out.push_str(&format!("\n  [{}] {}", button.callback_data, button.text));
    }
    out
}

fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
