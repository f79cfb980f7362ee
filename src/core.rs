//! Core domain types for GitHub Monitor
//!
//! This module defines the fundamental data structures that govern component
//! interactions throughout the application.

use serde_json::Value;

/// A single inbound webhook delivery, as handed to the dispatcher.
///
/// The payload is kept untyped: GitHub event bodies are large, heterogeneous,
/// and mostly optional, so formatters read the few fields they care about
/// through [`crate::payload`] and default the rest.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// The event kind, taken from the `X-GitHub-Event` request header.
    /// Empty when the header is absent.
    pub kind: String,
    /// The parsed JSON request body. `{}` when the body was empty or
    /// unparsable.
    pub payload: Value,
}

impl WebhookEvent {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// The event's sub-action (e.g. `workflow_run`'s "completed" vs
    /// "requested"), read from the payload's top-level `action` field.
    pub fn action(&self) -> Option<&str> {
        self.payload.get("action").and_then(Value::as_str)
    }
}

/// How the destination channel should interpret a notification's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatting {
    Plain,
    /// Telegram's HTML markup subset (bold, inline code, hyperlink).
    Html,
}

/// A formatted message ready to be handed to a notification client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub formatting: Formatting,
}

impl Notification {
    /// Creates an HTML-formatted notification, the variant every event
    /// formatter produces.
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formatting: Formatting::Html,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formatting: Formatting::Plain,
        }
    }
}
