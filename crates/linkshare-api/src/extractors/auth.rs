//! `AuthUser` extractors: pull the JWT from the Authorization header,
//! validate it, load the user and inject context.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;

        // Role and share capability come from the current record, not the token.
        let user = state
            .user_repo
            .get(claims.user_id())
            .await
            .map_err(|e| match e.kind {
                ErrorKind::NotFound => AppError::unauthorized("Unknown user"),
                _ => e,
            })?;

        Ok(AuthUser(RequestContext::from_user(&user)))
    }
}

/// Caller context when a valid bearer token is present, `None` otherwise.
///
/// Used on anonymous endpoints whose responses depend on who is asking.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<RequestContext>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key("authorization") {
            return Ok(Self(None));
        }
        let ctx = AuthUser::from_request_parts(parts, state)
            .await
            .ok()
            .map(|auth| auth.0);
        Ok(Self(ctx))
    }
}
