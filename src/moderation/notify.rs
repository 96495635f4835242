//! Warning side channel for moderation actions.
//!
//! Warn actions are fire-and-forget: the store hands a [`WarningNotice`] to a
//! [`Notifier`] and moves on. Delivery (email, in-app inbox) lives outside this
//! crate.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::moderation::core::action::WarnTarget;
use crate::moderation::core::ids::ConversationId;

/// A warning addressed to one participant of a conversation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WarningNotice {
    /// Conversation the warning relates to.
    pub conversation_id: ConversationId,
    /// Which side is warned.
    pub target: WarnTarget,
    /// Identity of the warned participant.
    pub recipient: String,
    /// Human-readable payload.
    pub message: String,
}

impl WarningNotice {
    /// Build the standard notice for `recipient`.
    #[must_use]
    pub fn new(conversation_id: ConversationId, target: WarnTarget, recipient: &str) -> Self {
        Self {
            conversation_id,
            target,
            recipient: recipient.to_string(),
            message: format!("A warning has been sent to {recipient}."),
        }
    }
}

/// Receiver of moderation warnings.
pub trait Notifier: Send + Sync {
    /// Deliver a notice. Must not fail the calling action.
    fn notify(&self, notice: &WarningNotice);
}

/// Notifier that only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &WarningNotice) {
        warn!(
            conversation = %notice.conversation_id,
            target = %notice.target,
            recipient = %notice.recipient,
            "moderation warning issued"
        );
    }
}

/// Notices kept by [`RecordingNotifier::new`].
pub const DEFAULT_NOTICE_HISTORY: usize = 256;

/// Notifier that keeps the most recent notices in memory.
///
/// Once `limit` notices are held, each new one evicts the oldest.
#[derive(Clone, Debug)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<VecDeque<WarningNotice>>>,
    limit: usize,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::with_limit(DEFAULT_NOTICE_HISTORY)
    }
}

impl RecordingNotifier {
    /// Create an empty recorder holding up to [`DEFAULT_NOTICE_HISTORY`] notices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty recorder holding up to `limit` notices (at least one).
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            notices: Arc::new(Mutex::new(VecDeque::with_capacity(limit))),
            limit,
        }
    }

    /// Snapshot of the recorded notices, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<WarningNotice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Number of recorded notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &WarningNotice) {
        TracingNotifier.notify(notice);
        let mut notices = self.notices.lock().unwrap_or_else(PoisonError::into_inner);
        if notices.len() >= self.limit {
            notices.pop_front();
        }
        notices.push_back(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_shares_state_across_clones() {
        let recorder = RecordingNotifier::new();
        let handle = recorder.clone();
        let id = ConversationId::new("1").unwrap();

        handle.notify(&WarningNotice::new(id, WarnTarget::Customer, "CUST001"));

        assert_eq!(recorder.len(), 1);
        assert_eq!(
            recorder.notices()[0].message,
            "A warning has been sent to CUST001."
        );
    }

    #[test]
    fn test_recorder_keeps_most_recent_notices() {
        let recorder = RecordingNotifier::with_limit(2);
        let id = ConversationId::new("1").unwrap();
        for recipient in ["CUST001", "VDR001", "CUST002"] {
            recorder.notify(&WarningNotice::new(id.clone(), WarnTarget::Customer, recipient));
        }

        let recipients: Vec<String> = recorder
            .notices()
            .into_iter()
            .map(|n| n.recipient)
            .collect();
        assert_eq!(recipients, ["VDR001", "CUST002"]);
    }
}
