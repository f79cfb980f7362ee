//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using
//! the `clap` crate. These arguments are parsed at startup and then merged
//! with the configuration from the `github-monitor.toml` file and
//! environment variables.

use clap::Parser;
use figment::{
    providers::Serialized,
    value::{Dict, Map},
    Error, Figment, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// A webhook service forwarding GitHub events to a Telegram chat.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Socket address to listen on for inbound webhooks.
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Destination Telegram chat id.
    #[arg(long, value_name = "ID")]
    pub chat_id: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut figment = Figment::new();

        if let Some(listen) = &self.listen {
            figment = figment.merge(Serialized::default("server.listen", listen));
        }

        if let Some(chat_id) = &self.chat_id {
            figment = figment.merge(Serialized::default("telegram.chat_id", chat_id));
        }

        figment.data()
    }
}
