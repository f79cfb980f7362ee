pub mod mock_telegram;

use github_monitor::dispatch::Dispatcher;
use github_monitor::server::router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serves the application router on an ephemeral port and returns its
/// address. The server task lives until the test's runtime is dropped.
pub async fn spawn_app(dispatcher: Arc<Dispatcher>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    let app = router(dispatcher);
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .unwrap();
    });
    addr
}
