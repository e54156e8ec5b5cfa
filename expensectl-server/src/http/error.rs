//! API error types with IntoResponse
//!
//! Every error renders as `{"message": "..."}` with a matching status code.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// Value of `WWW-Authenticate` on 401 responses
pub const BASIC_REALM: &str = "Basic realm=\"Restricted\"";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed body or path parameter (400)
    BadRequest { message: String },

    /// Missing or wrong basic-auth credentials (401)
    Unauthorized,

    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// Storage failure (500, logged). `context` names what was attempted.
    Storage {
        context: &'static str,
        source: DbError,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Map a store error, turning `NotFound` into a 404 for expenses.
    pub fn from_db(context: &'static str, err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => Self::NotFound {
                resource: "expense",
            },
            source => Self::Storage { context, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::BadRequest { message } => message.clone(),
            Self::Unauthorized => "Unauthorized".to_owned(),
            Self::NotFound { resource } => format!("{} not found", resource),
            Self::Storage { context, source } => format!("{}: {}", context, source),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Storage { context, source } = &self {
            tracing::error!(error = %source, "{}", context);
        }

        let status = self.status();
        let mut response = (status, Json(json!({ "message": self.message() }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_REALM));
        }

        response
    }
}
