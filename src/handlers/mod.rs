// handlers/mod.rs - Note request handler
//
// Transport-neutral entry point: `NoteService::handle` turns one
// `NoteRequest` into one `NoteResponse` with at most one store call.
// The HTTP and gateway adapters both funnel into it.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::error::ApiError;
use crate::store::{SharedStore, StoreError};

pub mod clock;
pub mod notes;

pub use clock::{Clock, SharedClock, SystemClock};

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Inbound request, validated once at the transport boundary
#[derive(Debug, Clone)]
pub struct NoteRequest {
    pub method: Method,
    pub path: String,
    /// Raw request body; only POST and PUT read it
    pub body: Option<Vec<u8>>,
    /// Verified subject claim injected by the gateway
    pub owner_id: Option<String>,
}

impl NoteRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            owner_id: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }
}

/// Status plus JSON body; always sent as `application/json`
#[derive(Debug, Clone, PartialEq)]
pub struct NoteResponse {
    pub status: StatusCode,
    /// `None` for 204 responses
    pub body: Option<Value>,
}

impl NoteResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: None,
        }
    }

    /// Serialized body; empty for 204
    pub fn body_string(&self) -> String {
        self.body.as_ref().map(Value::to_string).unwrap_or_default()
    }
}

/// Resolved `(method, path)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Update(String),
    Delete(String),
    NotFound,
}

impl Route {
    pub fn resolve(method: &Method, path: &str) -> Self {
        if path == "/notes" {
            return match *method {
                Method::GET => Route::List,
                Method::POST => Route::Create,
                _ => Route::NotFound,
            };
        }

        let Some(rest) = path.strip_prefix("/notes/") else {
            return Route::NotFound;
        };

        let note_id = rest.trim();
        if note_id.is_empty() {
            return Route::NotFound;
        }

        match *method {
            Method::PUT => Route::Update(note_id.to_string()),
            Method::DELETE => Route::Delete(note_id.to_string()),
            _ => Route::NotFound,
        }
    }
}

/// Owner-scoped note CRUD over an injected store
#[derive(Clone)]
pub struct NoteService {
    store: SharedStore,
    clock: SharedClock,
}

impl NoteService {
    pub fn new(store: SharedStore) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: SharedStore, clock: SharedClock) -> Self {
        Self { store, clock }
    }

    /// Handle one request.
    ///
    /// Client errors come back as `Ok` responses. Only store failures other
    /// than a failed update precondition are returned as `Err`.
    pub async fn handle(&self, request: NoteRequest) -> Result<NoteResponse, StoreError> {
        let owner_id = match request.owner_id.as_deref() {
            Some(owner_id) if !owner_id.is_empty() => owner_id,
            _ => return Ok(ApiError::unauthorized().into()),
        };

        let route = Route::resolve(&request.method, &request.path);
        tracing::debug!("{} {} -> {:?} for owner {}", request.method, request.path, route, owner_id);

        let store = self.store.as_ref();
        let body = request.body.as_deref();

        match route {
            Route::List => notes::list(store, owner_id).await,
            Route::Create => notes::create(store, self.clock.as_ref(), owner_id, body).await,
            Route::Update(note_id) => {
                notes::update(store, self.clock.as_ref(), owner_id, &note_id, body).await
            }
            Route::Delete(note_id) => notes::delete(store, owner_id, &note_id).await,
            Route::NotFound => Ok(ApiError::not_found().into()),
        }
    }
}
