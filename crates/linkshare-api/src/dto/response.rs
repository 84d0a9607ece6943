//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// Whether the storage root is reachable.
    pub storage: String,
}

/// Result of a create or modify request on a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
    /// Validator of the written file; absent for directories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Result of a copy or move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResponse {
    /// Final destination inside the share.
    pub destination: String,
}
