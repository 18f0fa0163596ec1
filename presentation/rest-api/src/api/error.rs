use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error body returned by every failing endpoint.
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error kind, e.g. `ValidationError`
    pub name: String,
    /// Human readable or code-style message
    pub message: String,
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
