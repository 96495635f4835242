//! Conversation moderation for the admin chat-log view.
//!
//! This module is organized into:
//! - `core`: identifiers, statuses, the transition table, conversations, config
//! - `store`: the in-memory store (selection, actions, ticket ingestion)
//! - `events`: event-list dispatch and replay over the store
//! - `deep_link`: support-ticket query string parsing
//! - `notify`: warning side channel
//! - `seed`: built-in and file-based seed conversations
//! - `clock`: time source for written messages

pub mod clock;
pub mod core;
pub mod deep_link;
pub mod events;
pub mod notify;
pub mod seed;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use self::core::{
    AdminIdentity, Conversation, ConversationId, ConversationStatus, Message, MessageId,
    ModerationAction, ModerationConfig, ModerationPolicy, RESOLVED_NOTICE, SenderRole, WarnTarget,
};
pub use deep_link::SupportTicketLink;
pub use events::{EventOutcome, ModerationEvent};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier, WarningNotice};
pub use store::{ActionOutcome, ActionReport, Feedback, IngestOutcome, ModerationStore};
