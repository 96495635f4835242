//! Core moderation types and identifiers.

pub mod action;
pub mod config;
pub mod conversation;
pub mod ids;
pub mod status;

pub use action::{ModerationAction, RESOLVED_NOTICE, Transition, WarnTarget, transition};
pub use config::{AdminIdentity, DEFAULT_AVATAR, ModerationConfig, ModerationPolicy};
pub use conversation::{Conversation, Message};
pub use ids::{ConversationId, IdError, MessageId};
pub use status::{ConversationStatus, SenderRole};
