//! Bearer-token authentication extractor for Axum handlers.
//!
//! Token verification is a stub: any non-empty token is accepted. Handlers
//! still take [`AuthUser`] so that public and private routes are explicit.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use kennel_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Caller identified by a Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(_auth: AuthUser) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The raw bearer token.
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        Ok(AuthUser {
            token: token.to_string(),
        })
    }
}
