//! Request identity extraction.
//!
//! Session and token management is owned by an external collaborator that
//! fronts this service; by the time a request reaches these handlers the
//! acting user has been resolved and is carried in the `x-user-id` header.
//! `CurrentUser` is the extractor seam for that contract.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the resolved user id, set by the fronting auth layer.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user on whose behalf a request runs.
pub struct CurrentUser(pub String);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Missing user identity".to_string()))?;

        Ok(CurrentUser(user_id.to_string()))
    }
}
