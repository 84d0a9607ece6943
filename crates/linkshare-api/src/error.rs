//! Maps domain `AppError` to HTTP responses.

// The `IntoResponse` impl for `AppError` lives in `linkshare_core::error`
// (orphan rule); the mapping helpers are re-exported here.
pub use linkshare_core::error::{ApiErrorResponse, status_for};
