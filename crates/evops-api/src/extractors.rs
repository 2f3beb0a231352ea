//! # Custom Extractors
//!
//! `ValidatedJson<T>` deserializes a JSON body and runs [`Validate`] on
//! it. Both failure kinds surface as [`AppError`] so that every client
//! error carries the same JSON body instead of axum's plain-text
//! rejections.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Business-rule checks on a deserialized request body.
pub trait Validate {
    /// Return a human-readable reason when the body is unacceptable.
    fn validate(&self) -> Result<(), String>;
}

/// JSON body extractor that validates after deserializing.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate().map_err(AppError::Validation)?;
        Ok(Self(value))
    }
}
