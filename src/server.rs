//! # Webhook Server
//!
//! This module defines the `WebhookServer`, which is responsible for running
//! an `axum`-based web server that receives GitHub webhook deliveries and
//! hands them to the [`Dispatcher`].
//!
//! The endpoint always acknowledges with HTTP 200, whatever happens during
//! dispatch or delivery: a webhook sender that sees failures will retry or
//! disable the hook, and neither is wanted here.
//!
//! The server is designed for graceful shutdown, listening to a signal from
//! the main application to stop serving requests and terminate cleanly.

use crate::core::WebhookEvent;
use crate::dispatch::Dispatcher;
use axum::{
    extract::State,
    http::HeaderMap,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::trace;

const LANDING_PAGE: &str = r#"
    <html>
        <head><title>GitHub Monitor</title></head>
        <body style="font-family: Arial; padding: 40px; text-align: center;">
            <h1>🚀 GitHub Monitor</h1>
            <p>Servidor activo y escuchando webhooks de GitHub.</p>
            <p><b>Endpoint:</b> <code>POST /github-push</code></p>
            <hr>
            <p>Eventos soportados:</p>
            <ul style="list-style: none;">
                <li>✅ push</li>
                <li>✅ workflow_run</li>
                <li>✅ deployment_status</li>
            </ul>
        </body>
    </html>
    "#;

/// A server that receives webhook deliveries and dispatches them.
///
/// This struct encapsulates the `axum` server, providing a clean interface
/// for managing the server's lifecycle.
pub struct WebhookServer {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    shutdown_rx: watch::Receiver<()>,
}

impl WebhookServer {
    /// Creates a new `WebhookServer` but does not spawn it.
    ///
    /// # Arguments
    ///
    /// * `listener` - A `TcpListener` that has already been bound to an address.
    /// * `dispatcher` - The event dispatcher shared across requests.
    /// * `shutdown_rx` - A watch channel receiver for graceful shutdown.
    pub fn new(
        listener: TcpListener,
        dispatcher: Arc<Dispatcher>,
        shutdown_rx: watch::Receiver<()>,
    ) -> Self {
        Self {
            listener,
            dispatcher,
            shutdown_rx,
        }
    }

    /// Returns a future that runs the server until a shutdown signal is received.
    pub fn run(mut self) -> impl Future<Output = ()> {
        let app = router(self.dispatcher);

        async move {
            tokio::select! {
                biased;
                _ = self.shutdown_rx.changed() => {
                    trace!("Webhook server received shutdown signal via select.");
                }
                result = axum::serve(self.listener, app.into_make_service()) => {
                    if let Err(e) = result {
                        error!("Webhook server error: {}", e);
                    }
                }
            }
            trace!("Webhook server task finished.");
        }
    }
}

/// Builds the application router. Exposed so integration tests can serve the
/// same routes on an ephemeral listener.
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/github-push", post(github_webhook))
        .route("/health", get(health_check))
        .route("/", get(home))
        .with_state(dispatcher)
}

/// Receives a webhook delivery, classifies it, and acknowledges it.
///
/// The event kind travels in the `X-GitHub-Event` header; the body is the
/// event payload. An empty or unparsable body is treated as `{}` so the
/// dispatcher always sees a payload.
async fn github_webhook(
    State(dispatcher): State<Arc<Dispatcher>>,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    let kind = headers
        .get("x-github-event")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    let payload: Value = serde_json::from_str(&body).unwrap_or_else(|_| json!({}));

    info!("Received GitHub event: {}", kind);

    let event = WebhookEvent::new(kind, payload);
    dispatcher.dispatch(&event).await;

    Json(json!({ "status": "ok", "event": event.kind }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "GitHub Monitor" }))
}

async fn home() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
