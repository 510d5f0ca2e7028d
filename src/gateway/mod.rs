// gateway/mod.rs - API gateway event adapter
//
// Maps an HTTP-API style event onto `NoteRequest` and the handler's response
// back onto `{statusCode, headers, body}`. The verified subject sits at
// `requestContext.authorizer.jwt.claims.sub`.

use std::collections::BTreeMap;

use axum::http::Method;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::Claims;
use crate::handlers::{NoteRequest, NoteResponse, NoteService, CONTENT_TYPE_JSON};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Event has no requestContext.http.method")]
    MissingMethod,

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Body is flagged base64 but does not decode: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Errors that abort an invocation
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error(transparent)]
    Event(#[from] GatewayError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub raw_path: String,
    #[serde(default)]
    pub request_context: RequestContext,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<HttpContext>,
    #[serde(default)]
    pub authorizer: Option<Authorizer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpContext {
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Authorizer {
    #[serde(default)]
    pub jwt: Option<JwtAuthorizer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JwtAuthorizer {
    #[serde(default)]
    pub claims: Option<Claims>,
}

impl GatewayEvent {
    /// Verified subject claim, if the authorizer supplied one
    pub fn subject(&self) -> Option<&str> {
        self.request_context
            .authorizer
            .as_ref()?
            .jwt
            .as_ref()?
            .claims
            .as_ref()?
            .sub
            .as_deref()
    }
}

impl TryFrom<GatewayEvent> for NoteRequest {
    type Error = GatewayError;

    fn try_from(event: GatewayEvent) -> Result<Self, Self::Error> {
        let method = event
            .request_context
            .http
            .as_ref()
            .and_then(|http| http.method.as_deref())
            .ok_or(GatewayError::MissingMethod)?;
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| GatewayError::InvalidMethod(method.to_string()))?;

        let mut request = NoteRequest::new(method, event.raw_path.as_str());
        request.owner_id = event.subject().map(str::to_string);
        request.body = match event.body {
            Some(body) if event.is_base64_encoded => Some(BASE64.decode(body)?),
            Some(body) => Some(body.into_bytes()),
            None => None,
        };

        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<NoteResponse> for GatewayResponse {
    fn from(response: NoteResponse) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), CONTENT_TYPE_JSON.to_string());

        Self {
            status_code: response.status.as_u16(),
            headers,
            body: response.body_string(),
        }
    }
}

/// Handle one gateway event end to end
pub async fn invoke(
    service: &NoteService,
    event: GatewayEvent,
) -> Result<GatewayResponse, InvokeError> {
    let request = NoteRequest::try_from(event)?;
    let response = service.handle(request).await?;
    Ok(response.into())
}
