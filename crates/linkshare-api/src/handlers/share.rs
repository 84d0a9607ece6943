//! Share link management handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use linkshare_core::error::AppError;
use linkshare_entity::share::{CreateShareBody, PublicShareBody};

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/shares
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let links = state.share_service.list(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": links })))
}

/// GET /api/publicshares
pub async fn list_public_shares(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let entries = state.share_service.list_public(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": entries })))
}

/// GET /api/share/{*path}
pub async fn list_path_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let links = state.share_service.list_for_path(&auth, &path).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": links })))
}

/// POST /api/share/{*path}
///
/// The body is optional; an empty body creates an unprotected link that
/// never expires.
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let body: CreateShareBody = if body.is_empty() {
        CreateShareBody::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?
    };

    let link = state.share_service.create(&auth, &path, body).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": link })))
}

/// DELETE /api/share/{hash}
pub async fn delete_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hash): Path<String>,
) -> Result<StatusCode, AppError> {
    state.share_service.delete(&auth, &hash).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/shares/{hash}/public
pub async fn publish_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hash): Path<String>,
    Json(body): Json<PublicShareBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let link = state.share_service.publish(&auth, &hash, body).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": link })))
}

/// PUT /api/shares/{hash}/private
pub async fn unpublish_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hash): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let link = state.share_service.unpublish(&auth, &hash).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": link })))
}
