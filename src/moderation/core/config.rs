//! Configuration for the moderation store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConsoleError, ConsoleResult};
use crate::moderation::notify::DEFAULT_NOTICE_HISTORY;

/// Placeholder avatar used by seed data and the admin identity.
pub const DEFAULT_AVATAR: &str = "https://placehold.co/40x40.png";

/// Top-level configuration for the moderation store.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationConfig {
    /// Behaviour on edge transitions.
    pub policy: ModerationPolicy,
    /// Identity used as the other party of support tickets.
    pub admin: AdminIdentity,
    /// Optional JSON seed file; built-in seed data is used when absent.
    pub seed_path: Option<PathBuf>,
    /// Warnings kept for the notices endpoint.
    pub notice_history: usize,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            policy: ModerationPolicy::default(),
            admin: AdminIdentity::default(),
            seed_path: None,
            notice_history: DEFAULT_NOTICE_HISTORY,
        }
    }
}

impl ModerationConfig {
    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are empty or invalid.
    pub fn validate(&self) -> ConsoleResult<()> {
        if self.admin.display_id.trim().is_empty() {
            return Err(ConsoleError::InvalidConfig(
                "admin.display_id must not be empty".to_string(),
            ));
        }

        Url::parse(&self.admin.avatar)?;

        if self
            .seed_path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConsoleError::InvalidConfig(
                "seed_path must not be empty when set".to_string(),
            ));
        }

        if self.notice_history == 0 {
            return Err(ConsoleError::InvalidConfig(
                "notice_history must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Edge-case behaviour of the transition table.
///
/// The defaults reproduce the chat-log viewer as it shipped: warnings still go
/// out on locked/resolved conversations and resolving a resolved ticket appends
/// the notice again.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationPolicy {
    /// Fire warn notifications on terminal conversations.
    pub warn_terminal: bool,
    /// Allow `resolve` on an already resolved ticket.
    pub repeat_resolve: bool,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            warn_terminal: true,
            repeat_resolve: true,
        }
    }
}

/// Admin party shown opposite the vendor in support tickets.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminIdentity {
    /// Identifier rendered in the vendor column.
    pub display_id: String,
    /// Avatar reference.
    pub avatar: String,
}

impl Default for AdminIdentity {
    fn default() -> Self {
        Self {
            display_id: "Admin".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
        }
    }
}
