//! Request extractors
//!
//! Drop-in replacements for axum's `Json`, `Path` and `Query` whose
//! rejections are [`AppError`]s, so malformed input gets the same error body
//! as every other failure.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use serde::de::DeserializeOwned;

use super::validation::Validate;
use crate::error::AppError;

/// Deserialize a JSON body into `T` and validate it into `T::Valid`.
///
/// Unparseable bodies, wrong JSON types and a missing JSON content type all
/// become a `request` field error.
pub struct ValidatedJson<T: Validate>(pub T::Valid);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
    T::Valid: Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await?;
        let valid = payload.validate()?;
        Ok(Self(valid))
    }
}

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);
