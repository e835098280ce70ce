//! Extractors whose rejections render as [`AppError`] JSON bodies.
//!
//! axum's stock `Json`, `Path` and `Query` reject with plain-text bodies (and
//! `422` for well-formed JSON of the wrong shape). Handlers use these wrappers
//! instead so every malformed request is a `400` with the standard error body.

use axum::extract::{FromRequest, FromRequestParts, OptionalFromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Option<AppJson<T>>` is `None` when the request has no `Content-Type`,
/// so an endpoint can take an optional body.
impl<T, S> OptionalFromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let json = <axum::Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(json.map(|axum::Json(value)| AppJson(value)))
    }
}

/// Path parameters (e.g. a UUID id segment).
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query-string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
