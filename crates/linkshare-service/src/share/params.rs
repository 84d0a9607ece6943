//! Request parameters of share content operations.

use std::str::FromStr;

use percent_encoding::percent_decode_str;

use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;

/// Decode a form-style percent-encoded value: `+` is a space, `%XX` a byte.
pub fn query_unescape(value: &str) -> AppResult<String> {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| AppError::validation("Parameter is not valid percent-encoded UTF-8"))
}

/// What a PATCH does with the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAction {
    /// Duplicate the source, recursively for directories.
    Copy,
    /// Move the source with the rename primitive.
    Move,
}

impl FromStr for TransferAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copy" => Ok(Self::Copy),
            "rename" => Ok(Self::Move),
            _ => Err(AppError::validation(format!("Unsupported action: '{s}'"))),
        }
    }
}

/// A copy or move request inside a share.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Destination as received, still percent-encoded.
    pub destination: String,
    /// Copy or move.
    pub action: TransferAction,
    /// Replace an existing destination.
    pub override_existing: bool,
    /// Pick a free suffixed name when the destination exists.
    pub rename: bool,
}
