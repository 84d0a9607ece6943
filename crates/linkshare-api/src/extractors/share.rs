//! Share secret extractor: the `token` query parameter and the
//! `X-SHARE-PASSWORD` header.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use linkshare_service::share::ShareCredentials;

/// Header carrying a percent-encoded share password.
pub const SHARE_PASSWORD_HEADER: &str = "x-share-password";

#[derive(Debug, Default, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Share credentials presented with a request.
#[derive(Debug, Clone, Default)]
pub struct ShareAccess(pub ShareCredentials);

impl<S: Send + Sync> FromRequestParts<S> for ShareAccess {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .map(|Query(q)| q.token)
            .unwrap_or_default()
            .filter(|t| !t.is_empty());

        let password = parts
            .headers
            .get(SHARE_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(Self(ShareCredentials { token, password }))
    }
}
