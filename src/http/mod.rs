// http/mod.rs - Axum adapter
//
// Every method and path goes to the note handler through a single fallback,
// so unknown routes get the handler's JSON 404 rather than axum's.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::owner_from_headers;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers::{NoteRequest, NoteService};

pub mod response;

/// Bare router around the note handler
pub fn router(service: NoteService) -> Router {
    Router::new().fallback(dispatch).with_state(service)
}

/// Router with the configured middleware layers
pub fn app(service: NoteService, config: &AppConfig) -> Router {
    let mut app = router(service);

    if config.security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

async fn dispatch(
    State(service): State<NoteService>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut request = NoteRequest::new(method, uri.path());
    request.owner_id = owner_from_headers(&headers);
    if !body.is_empty() {
        request.body = Some(body.to_vec());
    }

    match service.handle(request).await {
        Ok(response) => response.into_response(),
        Err(err) => {
            // Log the real error but return generic message
            tracing::error!("Note store error: {}", err);
            ApiError::internal_server_error().into_response()
        }
    }
}
