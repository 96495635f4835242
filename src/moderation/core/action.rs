//! Moderation actions and the status transition table.
//!
//! `transition` is the only place that decides whether an action changes a
//! conversation. The store, the HTTP layer and replay all go through it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::moderation::core::config::ModerationPolicy;
use crate::moderation::core::status::ConversationStatus;

/// Text of the system message appended when a support ticket is resolved.
pub const RESOLVED_NOTICE: &str = "Admin marked this conversation as resolved.";

/// An admin-invoked moderation action.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    /// Send a warning to the customer side.
    WarnCustomer,
    /// Send a warning to the vendor side.
    WarnVendor,
    /// Re-enable a flagged conversation.
    Approve,
    /// Permanently lock a flagged conversation.
    Lock,
    /// Close a support ticket.
    Resolve,
}

impl ModerationAction {
    /// All actions, in the order the viewer lays out its buttons.
    pub const ALL: [Self; 5] = [
        Self::Resolve,
        Self::Approve,
        Self::Lock,
        Self::WarnCustomer,
        Self::WarnVendor,
    ];

    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WarnCustomer => "warn_customer",
            Self::WarnVendor => "warn_vendor",
            Self::Approve => "approve",
            Self::Lock => "lock",
            Self::Resolve => "resolve",
        }
    }

    /// Target of the notification fired by warn actions.
    #[must_use]
    pub const fn warn_target(self) -> Option<WarnTarget> {
        match self {
            Self::WarnCustomer => Some(WarnTarget::Customer),
            Self::WarnVendor => Some(WarnTarget::Vendor),
            Self::Approve | Self::Lock | Self::Resolve => None,
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModerationAction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "warn_customer" => Ok(Self::WarnCustomer),
            "warn_vendor" => Ok(Self::WarnVendor),
            "approve" => Ok(Self::Approve),
            "lock" => Ok(Self::Lock),
            "resolve" => Ok(Self::Resolve),
            _ => Err(value.to_string()),
        }
    }
}

/// Which participant a warning is addressed to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnTarget {
    /// The customer side of the conversation.
    Customer,
    /// The vendor side of the conversation.
    Vendor,
}

impl WarnTarget {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
        }
    }
}

impl fmt::Display for WarnTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of looking up an action in the transition table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Transition {
    /// Status after the action.
    pub next: ConversationStatus,
    /// System message to append, if any.
    pub system_message: Option<&'static str>,
    /// Participant to notify, if any.
    pub notify: Option<WarnTarget>,
}

impl Transition {
    const fn stay(status: ConversationStatus) -> Self {
        Self {
            next: status,
            system_message: None,
            notify: None,
        }
    }

    /// Whether applying this transition changes anything observable.
    #[must_use]
    pub const fn is_noop(&self, current: ConversationStatus) -> bool {
        self.system_message.is_none()
            && self.notify.is_none()
            && (self.next as u8) == (current as u8)
    }
}

/// Look up `action` against `status` in the transition table.
///
/// | From | Action | To | Side effect |
/// |---|---|---|---|
/// | flagged | approve | active | none |
/// | flagged | lock | locked | none |
/// | active (support ticket) | resolve | resolved | append [`RESOLVED_NOTICE`] |
/// | any | `warn_customer` | unchanged | notify customer |
/// | any | `warn_vendor` | unchanged | notify vendor |
///
/// Every other pair leaves the status unchanged. `policy` decides whether
/// warnings still fire on terminal conversations and whether a resolved
/// ticket can be resolved again.
#[must_use]
pub const fn transition(
    status: ConversationStatus,
    action: ModerationAction,
    is_support_ticket: bool,
    policy: ModerationPolicy,
) -> Transition {
    use ConversationStatus::{Active, Flagged, Resolved};

    match (action, status) {
        (ModerationAction::Approve, Flagged) => Transition {
            next: Active,
            system_message: None,
            notify: None,
        },
        (ModerationAction::Lock, Flagged) => Transition {
            next: ConversationStatus::Locked,
            system_message: None,
            notify: None,
        },
        (ModerationAction::Resolve, Active) if is_support_ticket => Transition {
            next: Resolved,
            system_message: Some(RESOLVED_NOTICE),
            notify: None,
        },
        (ModerationAction::Resolve, Resolved) if is_support_ticket && policy.repeat_resolve => {
            Transition {
                next: Resolved,
                system_message: Some(RESOLVED_NOTICE),
                notify: None,
            }
        }
        (ModerationAction::WarnCustomer | ModerationAction::WarnVendor, _) => {
            if status.is_terminal() && !policy.warn_terminal {
                Transition::stay(status)
            } else {
                Transition {
                    next: status,
                    system_message: None,
                    notify: action.warn_target(),
                }
            }
        }
        _ => Transition::stay(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConversationStatus::{Active, Flagged, Locked, Resolved};

    const STATUSES: [ConversationStatus; 4] = [Active, Flagged, Locked, Resolved];

    #[test]
    fn test_approve_only_moves_flagged() {
        let policy = ModerationPolicy::default();
        for status in STATUSES {
            for ticket in [false, true] {
                let t = transition(status, ModerationAction::Approve, ticket, policy);
                let expected = if status == Flagged { Active } else { status };
                assert_eq!(t.next, expected, "approve from {status}");
                assert_eq!(t.system_message, None);
            }
        }
    }

    #[test]
    fn test_lock_only_moves_flagged() {
        let policy = ModerationPolicy::default();
        for status in STATUSES {
            let t = transition(status, ModerationAction::Lock, false, policy);
            let expected = if status == Flagged { Locked } else { status };
            assert_eq!(t.next, expected, "lock from {status}");
        }
    }

    #[test]
    fn test_resolve_requires_support_ticket() {
        let policy = ModerationPolicy::default();
        let ordinary = transition(Active, ModerationAction::Resolve, false, policy);
        assert!(ordinary.is_noop(Active));

        let ticket = transition(Active, ModerationAction::Resolve, true, policy);
        assert_eq!(ticket.next, Resolved);
        assert_eq!(ticket.system_message, Some(RESOLVED_NOTICE));

        let flagged = transition(Flagged, ModerationAction::Resolve, true, policy);
        assert!(flagged.is_noop(Flagged));
    }

    #[test]
    fn test_repeat_resolve_follows_policy() {
        let permissive = ModerationPolicy::default();
        let again = transition(Resolved, ModerationAction::Resolve, true, permissive);
        assert_eq!(again.system_message, Some(RESOLVED_NOTICE));

        let strict = ModerationPolicy {
            repeat_resolve: false,
            ..ModerationPolicy::default()
        };
        let guarded = transition(Resolved, ModerationAction::Resolve, true, strict);
        assert!(guarded.is_noop(Resolved));
    }

    #[test]
    fn test_terminal_states_never_change_status() {
        let policy = ModerationPolicy::default();
        for status in [Locked, Resolved] {
            for action in ModerationAction::ALL {
                for ticket in [false, true] {
                    assert_eq!(transition(status, action, ticket, policy).next, status);
                }
            }
        }
    }

    #[test]
    fn test_warnings_on_terminal_follow_policy() {
        let permissive = ModerationPolicy::default();
        let t = transition(Locked, ModerationAction::WarnVendor, false, permissive);
        assert_eq!(t.notify, Some(WarnTarget::Vendor));

        let strict = ModerationPolicy {
            warn_terminal: false,
            ..ModerationPolicy::default()
        };
        let t = transition(Locked, ModerationAction::WarnVendor, false, strict);
        assert_eq!(t.notify, None);
        let t = transition(Active, ModerationAction::WarnCustomer, false, strict);
        assert_eq!(t.notify, Some(WarnTarget::Customer));
    }

    #[test]
    fn test_action_strings_round_trip() {
        for action in ModerationAction::ALL {
            assert_eq!(action.as_str().parse::<ModerationAction>(), Ok(action));
        }
    }
}
