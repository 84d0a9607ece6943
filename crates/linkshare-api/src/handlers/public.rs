//! Public share handlers: reading and editing content through a link.
//!
//! The `{*path}` parameter is `<hash>/<path inside the share>`.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::TryStreamExt;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use linkshare_core::error::AppError;
use linkshare_core::traits::storage::ByteStream;
use linkshare_service::share::WriteOutcome;

use crate::dto::{ApiResponse, PublicShareQuery, TransferResponse, WriteResponse};
use crate::extractors::{AuthUser, OptionalAuthUser, ShareAccess};
use crate::state::AppState;

/// GET /api/public/share/{*path}
pub async fn get_shared(
    State(state): State<AppState>,
    Path(path): Path<String>,
    ShareAccess(credentials): ShareAccess,
    OptionalAuthUser(caller): OptionalAuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let resource = state
        .public_share_service
        .get(&path, &credentials, caller.as_ref())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": resource })))
}

/// GET /api/public/dl/{*path}
pub async fn download_shared(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<PublicShareQuery>,
    ShareAccess(credentials): ShareAccess,
) -> Result<Response, AppError> {
    let download = state
        .public_share_service
        .download(&path, &credentials)
        .await?;

    let disposition = if query.inline() { "inline" } else { "attachment" };
    let filename = utf8_percent_encode(&download.name, NON_ALPHANUMERIC);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, download.mime)
        .header(
            header::CONTENT_DISPOSITION,
            format!("{disposition}; filename*=utf-8''{filename}"),
        )
        .header(header::CONTENT_LENGTH, download.size)
        .body(Body::from_stream(download.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}

/// POST /api/public/share/{*path}
///
/// Creates a file from the request body, or a directory when the path ends
/// with `/`.
pub async fn create_shared(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<PublicShareQuery>,
    ShareAccess(credentials): ShareAccess,
    auth: AuthUser,
    body: Body,
) -> Result<Response, AppError> {
    let outcome = state
        .public_share_service
        .create(
            &path,
            &credentials,
            auth.0,
            body_stream(body),
            query.override_existing(),
        )
        .await?;

    let etag = match outcome {
        WriteOutcome::Directory => None,
        WriteOutcome::File { etag } => Some(etag),
    };
    write_response(etag)
}

/// PUT /api/public/share/{*path}
pub async fn modify_shared(
    State(state): State<AppState>,
    Path(path): Path<String>,
    ShareAccess(credentials): ShareAccess,
    auth: AuthUser,
    body: Body,
) -> Result<Response, AppError> {
    let etag = state
        .public_share_service
        .modify(&path, &credentials, auth.0, body_stream(body))
        .await?;
    write_response(Some(etag))
}

/// DELETE /api/public/share/{*path}
pub async fn delete_shared(
    State(state): State<AppState>,
    Path(path): Path<String>,
    ShareAccess(credentials): ShareAccess,
    auth: AuthUser,
) -> Result<StatusCode, AppError> {
    state
        .public_share_service
        .delete(&path, &credentials, auth.0)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/public/share/{*path}?destination=...&action=copy|rename
pub async fn transfer_shared(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<PublicShareQuery>,
    ShareAccess(credentials): ShareAccess,
    auth: AuthUser,
) -> Result<Json<ApiResponse<TransferResponse>>, AppError> {
    let request = query.transfer()?;
    let destination = state
        .public_share_service
        .transfer(&path, &credentials, auth.0, &request)
        .await?;
    Ok(Json(ApiResponse::ok(TransferResponse { destination })))
}

fn body_stream(body: Body) -> ByteStream {
    Box::pin(body.into_data_stream().map_err(std::io::Error::other))
}

fn write_response(etag: Option<String>) -> Result<Response, AppError> {
    let mut response = Json(ApiResponse::ok(WriteResponse { etag: etag.clone() })).into_response();
    if let Some(etag) = etag {
        let value = HeaderValue::from_str(&etag)
            .map_err(|e| AppError::internal(format!("Invalid ETag: {e}")))?;
        response.headers_mut().insert(header::ETAG, value);
    }
    Ok(response)
}
