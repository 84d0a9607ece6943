//! Request bodies for share link management.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use linkshare_core::types::UserId;

/// Body of a create-link request. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateShareBody {
    /// Link password; empty for an unprotected link.
    #[serde(default)]
    pub password: String,
    /// Expiry amount as a decimal string; empty or `"0"` for no expiry.
    #[serde(default)]
    pub expires: String,
    /// Unit of `expires`: `seconds`, `minutes`, `days`, anything else is hours.
    #[serde(default)]
    pub unit: String,
}

/// Body of a publish request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicShareBody {
    /// `"view"` or `"change"`.
    #[serde(default)]
    pub permission: String,
    /// Users allowed to use the `change` permission.
    #[serde(default)]
    pub allowed_users: Vec<UserId>,
}

/// Unit of a relative expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl ExpiryUnit {
    /// Parse a unit name; unknown or empty names fall back to hours.
    pub fn parse(unit: &str) -> Self {
        match unit {
            "seconds" => Self::Seconds,
            "minutes" => Self::Minutes,
            "days" => Self::Days,
            _ => Self::Hours,
        }
    }

    /// The duration of `amount` units, or `None` on overflow.
    pub fn duration(&self, amount: i64) -> Option<Duration> {
        match self {
            Self::Seconds => Duration::try_seconds(amount),
            Self::Minutes => Duration::try_minutes(amount),
            Self::Hours => Duration::try_hours(amount),
            Self::Days => Duration::try_days(amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_defaults_to_hours() {
        assert_eq!(ExpiryUnit::parse(""), ExpiryUnit::Hours);
        assert_eq!(ExpiryUnit::parse("weeks"), ExpiryUnit::Hours);
        assert_eq!(ExpiryUnit::parse("days"), ExpiryUnit::Days);
    }

    #[test]
    fn test_duration_per_unit() {
        assert_eq!(ExpiryUnit::Seconds.duration(90), Some(Duration::seconds(90)));
        assert_eq!(ExpiryUnit::Minutes.duration(2), Some(Duration::seconds(120)));
        assert_eq!(ExpiryUnit::Days.duration(1), Some(Duration::hours(24)));
        assert!(ExpiryUnit::Days.duration(i64::MAX).is_none());
    }

    #[test]
    fn test_bodies_accept_empty_json() {
        let create: CreateShareBody = serde_json::from_str("{}").unwrap();
        assert!(create.password.is_empty());
        let public: PublicShareBody =
            serde_json::from_str(r#"{"permission":"view"}"#).unwrap();
        assert!(public.allowed_users.is_empty());
    }
}
