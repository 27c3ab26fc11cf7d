use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::header,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

use crate::errors::RequestError;
use crate::services::kv_service;
use crate::state::command::Command;
use crate::state::kv::SharedStore;
use crate::state::reply::Reply;

/// Written when a reply cannot be encoded.
const FALLBACK_BODY: &str = r#"{"error":"something went wrong"}"#;

/// Build the `/req` route. Any HTTP verb is accepted; the operation is
/// chosen by the `method` field of the JSON body.
pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/req", any(handle_req))
        .with_state(store)
}

//
// ─────────────────────────────────────────────────────────────
// ANY /req
// Parse a command body and run it against the store
// ─────────────────────────────────────────────────────────────
//
async fn handle_req(
    State(store): State<SharedStore>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let reply = match parse_command(body) {
        Ok(command) => kv_service::dispatch(&store, command),
        Err(err) => {
            tracing::warn!(error = ?err, "rejecting request: {err}");
            Reply::bare_error(err.to_string())
        }
    };

    json_response(&reply)
}

fn parse_command(body: Result<Bytes, BytesRejection>) -> Result<Command, RequestError> {
    let bytes = body.map_err(RequestError::Body)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn json_response(reply: &Reply) -> Response {
    let body = serde_json::to_vec(reply).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize reply: {e}");
        FALLBACK_BODY.as_bytes().to_vec()
    });

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
