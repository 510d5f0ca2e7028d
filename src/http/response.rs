use axum::{
    http::header,
    response::{IntoResponse, Response},
};

use crate::handlers::{NoteResponse, CONTENT_TYPE_JSON};

// Status + JSON text + content-type, including on 204 where the body is empty
impl IntoResponse for NoteResponse {
    fn into_response(self) -> Response {
        let body = self.body_string();
        (self.status, [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], body).into_response()
    }
}
