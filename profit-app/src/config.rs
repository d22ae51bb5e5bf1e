//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;

use anyhow::Context;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    /// File recording which users have been greeted
    pub seen_users_path: PathBuf,
    /// Requests each user may make per minute
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let seen_users_path = lookup("SEEN_USERS_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "seen_users.json".to_string())
            .into();

        let rate_limit_per_minute: u32 = lookup("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|| "60".to_string())
            .parse()
            .context("RATE_LIMIT_PER_MINUTE must be a non-negative integer")?;
        if rate_limit_per_minute == 0 {
            anyhow::bail!("RATE_LIMIT_PER_MINUTE must be at least 1");
        }

        Ok(Self {
            port,
            seen_users_path,
            rate_limit_per_minute,
        })
    }
}
