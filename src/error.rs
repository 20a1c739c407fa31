//! Error handler for registra.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Enum representing server-side errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Missing param: {0}")]
    MissingParam(String),

    #[error("Invalid param: {0}")]
    InvalidParam(String),

    #[error(transparent)]
    Axum(#[from] JsonRejection),

    #[error("SQL request failed: {0}")]
    Sql(#[from] sqlx::Error),

    #[error(transparent)]
    Crypto(#[from] crate::crypto::CryptoError),

    #[error("internal server error, {details}")]
    Internal { details: String },
}

impl ServerError {
    /// HTTP status this error maps to.
    ///
    /// Only validation failures and body rejections are user-correctable.
    /// Everything else is a 500 whose cause stays on the server.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParam(_) | Self::InvalidParam(_) | Self::Axum(_) => {
                StatusCode::BAD_REQUEST
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structure for detailed error responses.
#[derive(Debug, Serialize)]
pub struct ResponseError {
    r#type: Option<String>,
    title: String,
    status: u16,
    detail: String,
}

impl ResponseError {
    /// Update error status code.
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code.as_u16();
        self
    }

    /// Update `title` field.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    /// Add detailed error.
    pub fn details(mut self, description: &str) -> Self {
        self.detail = description.into();
        self
    }

    /// Transform [`ResponseError`] into a JSON body.
    pub fn into_body(self) -> Value {
        serde_json::to_value(&self).unwrap_or(Value::Null)
    }
}

impl Default for ResponseError {
    fn default() -> Self {
        Self {
            r#type: None,
            title: "Internal server error.".to_owned(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            detail: String::default(),
        }
    }
}
