//! Status enums shared by the storefront surfaces.

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// The action succeeded.
    Success,
    /// The action was rejected, typically by form validation.
    Error,
    /// Neutral information, such as a no-op.
    #[default]
    Info,
}

impl NotificationLevel {
    /// CSS modifier used by the notification markup (`notification-{level}`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            _ => Err(format!("invalid notification level: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_level_roundtrip() {
        for level in [
            NotificationLevel::Success,
            NotificationLevel::Error,
            NotificationLevel::Info,
        ] {
            assert_eq!(level.to_string().parse::<NotificationLevel>().unwrap(), level);
        }
        assert!("warning".parse::<NotificationLevel>().is_err());
    }
}
