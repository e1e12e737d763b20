//! # HTTP Relay Server
//!
//! Serves the order lookup UI and relays calls to the upstream order API
//! with the configured bearer token.
//!
//! ## Routes
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /`, `/webhook`, `/order-xml` | UI pages |
//! | `POST /set-config` | Set upstream URL and token |
//! | `GET /get-config` | Current upstream URL |
//! | `POST /webhook` | Webhook notification: fetch and cache the resource |
//! | `GET /get-data` | Cached webhook results |
//! | `GET /api/orders` | List or search orders |
//! | `GET /api/orders/:id` | Single order |
//! | `GET /api/orders/:id/lines/:line_type` | Order lines |
//! | `GET /api/documents?link=` | Document download |
//! | `POST /api/documents/extract` | Documents listed in a payload |
//! | `POST /api/convert` | Render a posted payload as JSON, XML or cards |
//!
//! Order routes take `format=json|xml|cards` and `download=true`.
//!
//! ## Usage
//!
//! ```bash
//! orderdesk serve --listen 0.0.0.0:3000 --api-url https://acme.test.qbiltrade.com --api-token ...
//! ```
//!
//! Then open http://localhost:3000 in a browser.

mod handlers;
mod state;
mod static_files;

pub use handlers::orders::ORDER_COUNT_HEADER;
pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::OrderDeskError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route(
            "/webhook",
            get(static_files::webhook_handler).post(handlers::webhook::receive),
        )
        .route("/order-xml", get(static_files::xml_conversion_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        .route("/health", get(|| async { "OK" }))
        // Configuration
        .route("/set-config", post(handlers::config::set_config))
        .route("/get-config", get(handlers::config::get_config))
        // Webhook results
        .route("/get-data", get(handlers::webhook::results))
        // Order relay
        .route("/api/orders", get(handlers::orders::list))
        .route("/api/orders/:id", get(handlers::orders::get))
        .route(
            "/api/orders/:id/lines/:line_type",
            get(handlers::orders::lines),
        )
        .route("/api/documents", get(handlers::orders::document))
        .route(
            "/api/documents/extract",
            post(handlers::convert::documents),
        )
        // Conversion
        .route("/api/convert", post(handlers::convert::convert))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use orderdesk::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), orderdesk::error::OrderDeskError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:3000".to_string(),
///     ..Default::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), OrderDeskError> {
    let app_state = Arc::new(AppState::new(config.clone())?);
    let app = router(app_state);

    info!("orderdesk HTTP server starting");
    info!("Listening on: {}", config.listen_addr);
    match &config.api_config {
        Some(api) => info!("Upstream API: {}", api.api_url),
        None => info!("Upstream API not configured yet (POST /set-config)"),
    }

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            OrderDeskError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| OrderDeskError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
