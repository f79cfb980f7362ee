//! Configuration management for GitHub Monitor
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to load configuration from a `github-monitor.toml` file and merge
//! it with environment variables and command-line arguments.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Placeholder credential used when no bot token is configured. The service
/// still starts so the webhook endpoint can be exercised; deliveries will
/// fail and be logged.
pub const PLACEHOLDER_BOT_TOKEN: &str = "TU_BOT_TOKEN_AQUI";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Configuration for the inbound webhook server.
    pub server: ServerConfig,
    /// Configuration for the outbound Telegram client.
    pub telegram: TelegramConfig,
}

/// Configuration for the inbound webhook server.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// The socket address the HTTP server binds to.
    pub listen: String,
}

/// Configuration for the outbound Telegram client.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    /// Base URL of the Bot API. Overridable so tests can point the client
    /// at a local mock server.
    pub api_base: String,
    /// The bot credential token.
    pub bot_token: String,
    /// The destination chat id.
    pub chat_id: String,
}

impl Config {
    /// Loads the application configuration by layering sources: defaults,
    /// file, environment, and CLI args.
    pub fn load_from_cli(cli: Cli) -> Result<Self> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| "github-monitor.toml".into());

        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // Allow overriding with environment variables, e.g.
            // GITHUB_MONITOR_LOG_LEVEL=debug
            .merge(Env::prefixed("GITHUB_MONITOR_"))
            .merge(cli)
            .extract()?;

        // The bare variable names the original deployment used keep working.
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            config.telegram.bot_token = token;
        }
        if let Ok(chat_id) = std::env::var("TELEGRAM_CHAT_ID") {
            config.telegram.chat_id = chat_id;
        }

        Ok(config)
    }

    /// Whether a real bot token has been configured.
    pub fn has_bot_token(&self) -> bool {
        self.telegram.bot_token != PLACEHOLDER_BOT_TOKEN
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig {
                listen: "0.0.0.0:5000".to_string(),
            },
            telegram: TelegramConfig {
                api_base: "https://api.telegram.org".to_string(),
                bot_token: PLACEHOLDER_BOT_TOKEN.to_string(),
                chat_id: "-1003155739026".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("github-monitor").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_allow_startup_without_credentials() {
        let config = Config::default();
        assert!(!config.has_bot_token());
        assert_eq!(config.telegram.chat_id, "-1003155739026");
        assert_eq!(config.server.listen, "0.0.0.0:5000");
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
    }

    #[test]
    fn test_load_merges_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[telegram]
bot_token = "123:abc"
"#
        )
        .unwrap();

        let cli = cli(&["--config", file.path().to_str().unwrap()]);
        let config = Config::load_from_cli(cli).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert!(config.has_bot_token());
        // Untouched sections keep their defaults.
        assert_eq!(config.server.listen, "0.0.0.0:5000");
    }

    #[test]
    fn test_cli_overrides_file_and_defaults() {
        let cli = cli(&["--listen", "127.0.0.1:8080", "--chat-id", "42"]);
        let config = Config::load_from_cli(cli).unwrap();

        assert_eq!(config.server.listen, "127.0.0.1:8080");
        assert_eq!(config.telegram.chat_id, "42");
    }
}
