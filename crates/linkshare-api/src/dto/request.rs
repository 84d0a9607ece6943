//! Request DTOs.

use serde::Deserialize;

use linkshare_core::error::AppError;
use linkshare_service::share::{TransferAction, TransferRequest};

/// Query parameters of the public share endpoints.
///
/// Flags are enabled only by the literal value `true`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicShareQuery {
    /// Replace an existing target.
    #[serde(rename = "override")]
    pub override_existing: Option<String>,
    /// Pick a free name when the destination exists.
    pub rename: Option<String>,
    /// Copy or move destination.
    pub destination: Option<String>,
    /// `copy` or `rename`.
    pub action: Option<String>,
    /// Serve downloads inline instead of as attachments.
    pub inline: Option<String>,
}

fn flag(value: &Option<String>) -> bool {
    value.as_deref() == Some("true")
}

impl PublicShareQuery {
    /// Whether `override=true` was given.
    pub fn override_existing(&self) -> bool {
        flag(&self.override_existing)
    }

    /// Whether `inline=true` was given.
    pub fn inline(&self) -> bool {
        flag(&self.inline)
    }

    /// Build a copy or move request; `destination` and `action` are required.
    pub fn transfer(&self) -> Result<TransferRequest, AppError> {
        let destination = self
            .destination
            .clone()
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::validation("Missing destination"))?;
        let action: TransferAction = self.action.as_deref().unwrap_or_default().parse()?;
        Ok(TransferRequest {
            destination,
            action,
            override_existing: self.override_existing(),
            rename: flag(&self.rename),
        })
    }
}
