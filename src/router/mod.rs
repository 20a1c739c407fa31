pub mod signup;
pub mod status;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ResponseError, ServerError};

/// Inbound request envelope: a JSON body, nothing else is consumed.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub body: Value,
}

/// HTTP-shaped response built by controllers, serialized by axum.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// 201 with the created resource as body.
pub fn created<T: Serialize>(body: &T) -> HttpResponse {
    match serde_json::to_value(body) {
        Ok(body) => HttpResponse {
            status: StatusCode::CREATED,
            body,
        },
        Err(_) => internal_error(),
    }
}

/// 400 carrying the validation failure.
pub fn bad_request(err: &ServerError) -> HttpResponse {
    HttpResponse {
        status: StatusCode::BAD_REQUEST,
        body: ResponseError::default()
            .title("There were validation errors with your request.")
            .details(&err.to_string())
            .status(StatusCode::BAD_REQUEST)
            .into_body(),
    }
}

/// 500 with a generic body; the cause never reaches the client.
pub fn internal_error() -> HttpResponse {
    HttpResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: ResponseError::default().into_body(),
    }
}

impl From<ServerError> for HttpResponse {
    fn from(err: ServerError) -> Self {
        match err.status_code() {
            StatusCode::BAD_REQUEST => bad_request(&err),
            _ => {
                tracing::error!(error = %err, "request failed with server error");
                internal_error()
            },
        }
    }
}
