//! Conversation status and message sender kinds.
//!
//! Both enums use stable `snake_case` identifiers for storage and for the JSON
//! API; `as_str`/`FromStr` round-trip the same strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Moderation status of a conversation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    /// Open conversation; initial status for ordinary threads and support tickets.
    #[default]
    Active,
    /// Held for review by an upstream detector.
    Flagged,
    /// Permanently closed by an admin.
    Locked,
    /// Support ticket closed by an admin.
    Resolved,
}

impl ConversationStatus {
    /// Stable string form for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Flagged => "flagged",
            Self::Locked => "locked",
            Self::Resolved => "resolved",
        }
    }

    /// No moderation transition leaves a terminal status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Locked | Self::Resolved)
    }

    /// Whether the viewer should render this status as destructive.
    #[must_use]
    pub const fn is_alarming(self) -> bool {
        matches!(self, Self::Flagged | Self::Locked)
    }
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConversationStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "flagged" => Ok(Self::Flagged),
            "locked" => Ok(Self::Locked),
            "resolved" => Ok(Self::Resolved),
            _ => Err(value.to_string()),
        }
    }
}

/// Author role of a message.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderRole {
    /// The customer side (or the referring vendor in a support ticket).
    Customer,
    /// The vendor side (or the admin in a support ticket).
    Vendor,
    /// Structural entries written by the console itself.
    System,
}

impl SenderRole {
    /// Stable string form for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
            Self::System => "system",
        }
    }
}

impl fmt::Display for SenderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SenderRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Self::Customer),
            "vendor" => Ok(Self::Vendor),
            "system" => Ok(Self::System),
            _ => Err(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings_round_trip() {
        for status in [
            ConversationStatus::Active,
            ConversationStatus::Flagged,
            ConversationStatus::Locked,
            ConversationStatus::Resolved,
        ] {
            assert_eq!(status.as_str().parse::<ConversationStatus>(), Ok(status));
        }
        assert_eq!("closed".parse::<ConversationStatus>(), Err("closed".to_string()));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!ConversationStatus::Active.is_terminal());
        assert!(!ConversationStatus::Flagged.is_terminal());
        assert!(ConversationStatus::Locked.is_terminal());
        assert!(ConversationStatus::Resolved.is_terminal());
    }

    #[test]
    fn test_sender_serde_snake_case() {
        let json = serde_json::to_string(&SenderRole::System).unwrap();
        assert_eq!(json, "\"system\"");
    }
}
