use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use pressbox_llm::LlmProvider;
use tower_http::limit::RequestBodyLimitLayer;

use super::handlers::{chat_handler, clear_handler, health_handler, upload_handler};
use super::server::AppState;

/// Headroom on top of the file cap for multipart framing, so an oversized
/// file reaches the extractor's own size check and gets a precise 413.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub(crate) fn build_router<P: LlmProvider + 'static>(
    state: AppState<P>,
    max_body_size: usize,
) -> Router {
    let body_cap = max_body_size.saturating_add(MULTIPART_OVERHEAD);
    let limited = Router::new()
        .route("/upload", post(upload_handler::<P>))
        .route("/chat", post(chat_handler::<P>))
        .route("/clear", post(clear_handler::<P>))
        .layer(DefaultBodyLimit::max(body_cap))
        .layer(RequestBodyLimitLayer::new(body_cap));

    Router::new()
        .route("/health", get(health_handler::<P>))
        .merge(limited)
        .with_state(state)
}
