//! Routes inbound webhook events to the matching formatter and hands the
//! result to the notification client.
//!
//! Unmatched kinds and sub-actions are normal traffic: GitHub delivers many
//! event kinds this service does not care about, so they are acknowledged
//! and dropped without being treated as errors.

use crate::core::{Notification, WebhookEvent};
use crate::formatting::{
    format_deployment_status, format_push, format_workflow_run, DeploymentStatusFields,
    PushFields, WorkflowRunFields,
};
use crate::notification::telegram::TelegramClientTrait;
use std::sync::Arc;
use tracing::{debug, error};

/// The event dispatcher.
pub struct Dispatcher {
    telegram: Arc<dyn TelegramClientTrait>,
}

impl Dispatcher {
    /// Creates a new `Dispatcher` delivering through the given client.
    pub fn new(telegram: Arc<dyn TelegramClientTrait>) -> Self {
        Self { telegram }
    }

    /// Processes one inbound event: at most one outbound message is sent.
    ///
    /// Infallible from the caller's point of view; delivery failures are
    /// logged here and never reach the webhook response.
    pub async fn dispatch(&self, event: &WebhookEvent) {
        match event.kind.as_str() {
            "push" => {
                let fields = PushFields::from_payload(&event.payload);
                self.deliver(Notification::html(format_push(&fields))).await;
            }
            "workflow_run" => match event.action() {
                // Only completed runs are interesting; "requested" and
                // "in_progress" deliveries arrive for the same run.
                Some("completed") => {
                    let fields = WorkflowRunFields::from_payload(&event.payload);
                    self.deliver(Notification::html(format_workflow_run(&fields)))
                        .await;
                }
                action => {
                    debug!(?action, "Ignoring workflow_run action");
                }
            },
            "deployment_status" => {
                let fields = DeploymentStatusFields::from_payload(&event.payload);
                match format_deployment_status(&fields) {
                    Some(text) => self.deliver(Notification::html(text)).await,
                    None => {
                        debug!(state = %fields.state, "Ignoring deployment state");
                    }
                }
            }
            kind => {
                debug!(kind, "Unhandled event kind");
            }
        }
    }

    /// Delivery failures are swallowed by design: the upstream sender must
    /// always see a successful acknowledgment.
    async fn deliver(&self, notification: Notification) {
        if let Err(e) = self.telegram.send(&notification).await {
            error!("Failed to send Telegram notification: {e:#}");
        }
    }
}
