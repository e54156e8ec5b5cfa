//! Custom Axum extractors
//!
//! Both reject with `ApiError::BadRequest` so malformed input gets the same
//! `{"message": ...}` body as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Expense id from the `{id}` path segment, validated as an integer.
#[derive(Debug, Clone, Copy)]
pub struct ExpenseId(pub i32);

impl<S> FromRequestParts<S> for ExpenseId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("missing expense id"))?;

        let id = raw
            .parse::<i32>()
            .map_err(|_| ApiError::bad_request(format!("invalid expense id: {}", raw)))?;

        Ok(Self(id))
    }
}

/// JSON request body
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::bad_request(format!("invalid request body: {}", rejection.body_text()))
        })?;

        Ok(Self(value))
    }
}
