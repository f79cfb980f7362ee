//! A client for sending notifications to Telegram.

use crate::config::TelegramConfig;
use crate::core::{Formatting, Notification};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::task;
use tracing::{error, info, instrument};

/// A trait for clients that can deliver a notification to the chat.
#[async_trait]
pub trait TelegramClientTrait: Send + Sync {
    /// Sends a single notification.
    async fn send(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// A client for the Telegram Bot API's `sendMessage` method.
pub struct TelegramClient {
    api_base: String,
    bot_token: String,
    chat_id: String,
    timeout: std::time::Duration,
}

impl TelegramClient {
    /// Creates a new `TelegramClient`.
    pub fn new(api_base: String, bot_token: String, chat_id: String) -> Self {
        Self {
            api_base,
            bot_token,
            chat_id,
            timeout: std::time::Duration::from_secs(10),
        }
    }

    pub fn from_config(config: &TelegramConfig) -> Self {
        Self::new(
            config.api_base.clone(),
            config.bot_token.clone(),
            config.chat_id.clone(),
        )
    }

    fn request_body(&self, notification: &Notification) -> Value {
        let mut body = json!({
            "chat_id": self.chat_id,
            "text": notification.text,
            "disable_web_page_preview": false,
        });
        if notification.formatting == Formatting::Html {
            body["parse_mode"] = json!("HTML");
        }
        body
    }

    /// Sends the request in a blocking manner.
    fn send_request(
        client: reqwest::blocking::Client,
        url: &str,
        payload: &Value,
    ) -> anyhow::Result<()> {
        let response = client.post(url).json(payload).send();

        match response {
            Ok(res) => {
                if res.status().is_success() {
                    info!("Successfully sent message to Telegram.");
                    Ok(())
                } else {
                    let status = res.status();
                    let text = res.text().unwrap_or_default();
                    error!(
                        status = %status,
                        body = %text,
                        "Failed to send Telegram notification"
                    );
                    anyhow::bail!(
                        "Failed to send Telegram notification: status {}, body: {}",
                        status,
                        text
                    );
                }
            }
            Err(e) => {
                error!(error = %e, "HTTP request to Telegram failed");
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl TelegramClientTrait for TelegramClient {
    /// Sends a notification to the configured chat via `sendMessage`.
    #[instrument(skip(self, notification))]
    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let payload = self.request_body(notification);

        let timeout = self.timeout;
        let result = task::spawn_blocking(move || {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap();
            Self::send_request(client, &url, &payload)
        })
        .await;

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e),
            Err(e) => {
                error!(error = %e, "Telegram notification task failed");
                Err(e.into())
            }
        }
    }
}
