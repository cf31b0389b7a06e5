use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drawguess_rs::{websocket, words::WordBank, AppState};

const PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drawguess=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create shared state: the room registry and the word bank
    let state = AppState::new(WordBank::default());

    // Build router
    let app = Router::new()
        // WebSocket endpoint
        .route("/ws/drawguess", get(websocket::handler::ws_handler))
        // Serve static files
        .nest_service("/", ServeDir::new("static"))
        .with_state(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], PORT));
    tracing::info!("🎨 Drawguess server running on http://localhost:{}", PORT);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
