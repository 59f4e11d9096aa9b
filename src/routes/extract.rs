//! Extractor wrappers whose rejections go out as `{error}` JSON with 400.
//!
//! axum's own `Query` and `Json` reject with plain text (and 422 for a body
//! that parses but does not deserialize); these route every rejection
//! through [`InsightError::InvalidInput`] instead.

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::InsightError;

// ---

/// `Query<T>` with JSON rejections.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = InsightError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // ---
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| InsightError::InvalidInput(rejection.body_text()))?;
        Ok(ApiQuery(value))
    }
}

/// `Json<T>` with JSON rejections.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = InsightError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // ---
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| InsightError::InvalidInput(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}
