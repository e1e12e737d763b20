//! Static file serving for the frontend.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use include_dir::{Dir, include_dir};
use std::sync::Arc;

use super::state::AppState;

/// Embedded frontend distribution files.
static FRONTEND_DIST: Dir = include_dir!("$CARGO_MANIFEST_DIR/frontend/dist");

/// GET / - order lookup page.
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    page(&state, "index.html")
}

/// GET /webhook - cached webhook results page.
pub async fn webhook_handler(State(state): State<Arc<AppState>>) -> Response {
    page(&state, "webhook.html")
}

/// GET /order-xml - JSON to XML conversion page.
pub async fn xml_conversion_handler(State(state): State<Arc<AppState>>) -> Response {
    page(&state, "xml-conversion.html")
}

/// Serve an HTML page with a cache-busting parameter on its script/link tags.
fn page(state: &AppState, name: &str) -> Response {
    match FRONTEND_DIST.get_file(name) {
        Some(file) => {
            let contents = String::from_utf8_lossy(file.contents());
            let cache_bust = format!("?v={}", state.boot_time);
            let busted = contents
                .replace(".js\"", &format!(".js{}\"", cache_bust))
                .replace(".css\"", &format!(".css{}\"", cache_bust));
            Html(busted).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Page not found").into_response(),
    }
}

/// GET /assets/*path - stylesheet and script for the order pages.
pub async fn asset_handler(Path(path): Path<String>) -> impl IntoResponse {
    // `?v=` busting suffix
    let clean_path = path.split('?').next().unwrap_or(&path);
    let file_path = format!("assets/{}", clean_path);

    match FRONTEND_DIST.get_file(&file_path) {
        Some(file) => {
            let mime = mime_guess::from_path(clean_path)
                .first_or_octet_stream()
                .to_string();
            // Immutable per boot; pages append `?v={boot_time}`
            (
                [
                    (header::CONTENT_TYPE, mime),
                    (header::CACHE_CONTROL, "public, max-age=31536000".to_string()),
                ],
                file.contents().to_vec(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}
