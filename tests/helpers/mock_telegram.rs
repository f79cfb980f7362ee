//! A mock Telegram client for testing dispatch integration.

use async_trait::async_trait;
use github_monitor::core::Notification;
use github_monitor::notification::telegram::TelegramClientTrait;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default)]
pub struct MockTelegramClient {
    pub sent: Arc<Mutex<Vec<Notification>>>,
}

impl MockTelegramClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_notifications(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl TelegramClientTrait for MockTelegramClient {
    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(notification.clone());
        Ok(())
    }
}
