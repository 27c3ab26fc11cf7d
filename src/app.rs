use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::routes::req_routes;
use crate::state::kv::SharedStore;

/// Build the Axum application around a single shared store.
///
/// The only route is `/req`; everything else answers 404.
pub fn build_app(store: SharedStore) -> Router {
    Router::new()
        .merge(req_routes::routes(store))
        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
