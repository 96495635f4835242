//! Seed conversations loaded at start.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConsoleError, ConsoleResult};
use crate::moderation::clock::Clock;
use crate::moderation::core::config::DEFAULT_AVATAR;
use crate::moderation::core::conversation::{Conversation, Message};
use crate::moderation::core::ids::{ConversationId, MessageId};
use crate::moderation::core::status::{ConversationStatus, SenderRole};

/// Built-in demo conversations: one active thread and one flagged thread.
///
/// # Errors
/// Returns an error only if the built-in data violates an invariant.
pub fn builtin(clock: &dyn Clock) -> ConsoleResult<Vec<Conversation>> {
    let now = clock.now();
    let msg = |id: &str, sender: SenderRole, text: &str| -> ConsoleResult<Message> {
        Ok(Message::new(MessageId::new(id)?, sender, text, now))
    };

    let first = Conversation::new(
        ConversationId::new("1")?,
        "CUST001",
        "VDR001",
        ConversationStatus::Active,
        vec![
            msg(
                "msg1",
                SenderRole::Customer,
                "Hi! I'm interested in the Classic Leather Watch. Is it available in black?",
            )?,
            msg(
                "msg2",
                SenderRole::Vendor,
                "Hello! Yes, the Classic Leather Watch is available with a black strap. I can update the listing if you'd like to purchase it.",
            )?,
            msg("msg3", SenderRole::Customer, "That would be great, thank you!")?,
        ],
    )?
    .with_avatars(DEFAULT_AVATAR, DEFAULT_AVATAR);

    let second = Conversation::new(
        ConversationId::new("2")?,
        "CUST002",
        "VDR002",
        ConversationStatus::Flagged,
        vec![msg(
            "msg4",
            SenderRole::Customer,
            "Can you ship to Canada? My email is test@example.com",
        )?],
    )?
    .with_avatars(DEFAULT_AVATAR, DEFAULT_AVATAR);

    Ok(vec![first, second])
}

/// Load seed conversations from a JSON array file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, a conversation
/// violates an invariant, or two conversations share an id.
pub fn load_from_file(path: &Path) -> ConsoleResult<Vec<Conversation>> {
    let raw = std::fs::read_to_string(path)?;
    let conversations = parse(&raw)?;
    info!(
        path = %path.display(),
        count = conversations.len(),
        "loaded seed conversations"
    );
    Ok(conversations)
}

/// Parse and validate seed conversations from JSON.
///
/// # Errors
/// Returns an error on malformed JSON, invalid conversations, or duplicate ids.
pub fn parse(raw: &str) -> ConsoleResult<Vec<Conversation>> {
    let conversations: Vec<Conversation> = serde_json::from_str(raw)?;

    let mut seen = HashSet::new();
    for conversation in &conversations {
        conversation.validate()?;
        if !seen.insert(conversation.id.clone()) {
            return Err(ConsoleError::InvalidConversation(format!(
                "duplicate conversation id {}",
                conversation.id
            )));
        }
    }

    debug!(count = conversations.len(), "parsed seed conversations");
    Ok(conversations)
}
