//! Conversation and message model with validation helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, ConsoleResult};
use crate::moderation::core::action::ModerationAction;
use crate::moderation::core::ids::{ConversationId, MessageId};
use crate::moderation::core::status::{ConversationStatus, SenderRole};

/// A single entry in a conversation thread.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier, unique within the conversation.
    pub id: MessageId,
    /// Author role.
    pub sender: SenderRole,
    /// Body; structural system entries may carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Timestamp for ordering.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a message with a text body.
    #[must_use]
    pub fn new(
        id: MessageId,
        sender: SenderRole,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sender,
            text: Some(text.into()),
            timestamp,
        }
    }

    /// Build a system message.
    #[must_use]
    pub fn system(id: MessageId, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(id, SenderRole::System, text, timestamp)
    }
}

/// A customer/vendor thread (or vendor/admin support ticket) under moderation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier.
    pub id: ConversationId,
    /// Customer side identity (the vendor's display name for support tickets).
    pub customer_id: String,
    /// Vendor side identity (the admin for support tickets).
    pub vendor_id: String,
    /// Avatar reference of the customer side.
    pub customer_avatar: String,
    /// Avatar reference of the vendor side.
    pub vendor_avatar: String,
    /// Moderation status.
    pub status: ConversationStatus,
    /// Support tickets have their own resolution path.
    #[serde(default)]
    pub is_support_ticket: bool,
    /// Messages in chronological order.
    messages: Vec<Message>,
}

impl Conversation {
    /// Create a conversation from its first messages.
    ///
    /// # Errors
    /// Returns an error if `messages` is empty, an identity is blank, or two
    /// messages share an id.
    pub fn new(
        id: ConversationId,
        customer_id: impl Into<String>,
        vendor_id: impl Into<String>,
        status: ConversationStatus,
        messages: Vec<Message>,
    ) -> ConsoleResult<Self> {
        let conversation = Self {
            id,
            customer_id: customer_id.into(),
            vendor_id: vendor_id.into(),
            customer_avatar: String::new(),
            vendor_avatar: String::new(),
            status,
            is_support_ticket: false,
            messages,
        };
        conversation.validate()?;
        Ok(conversation)
    }

    /// Set both avatar references.
    #[must_use]
    pub fn with_avatars(
        mut self,
        customer_avatar: impl Into<String>,
        vendor_avatar: impl Into<String>,
    ) -> Self {
        self.customer_avatar = customer_avatar.into();
        self.vendor_avatar = vendor_avatar.into();
        self
    }

    /// Mark the conversation as a support ticket.
    #[must_use]
    pub const fn as_support_ticket(mut self) -> Self {
        self.is_support_ticket = true;
        self
    }

    /// Validate structural invariants.
    ///
    /// # Errors
    /// Returns an error if there are no messages, an identity is blank, or
    /// message ids collide.
    pub fn validate(&self) -> ConsoleResult<()> {
        if self.messages.is_empty() {
            return Err(ConsoleError::InvalidConversation(format!(
                "conversation {} has no messages",
                self.id
            )));
        }

        if self.customer_id.trim().is_empty() || self.vendor_id.trim().is_empty() {
            return Err(ConsoleError::InvalidConversation(format!(
                "conversation {} is missing a participant",
                self.id
            )));
        }

        for (i, message) in self.messages.iter().enumerate() {
            if self.messages[..i].iter().any(|m| m.id == message.id) {
                return Err(ConsoleError::InvalidConversation(format!(
                    "conversation {} repeats message id {}",
                    self.id, message.id
                )));
            }
        }

        Ok(())
    }

    /// Messages in chronological order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Id for the next system message: derived from the thread length, moved
    /// forward past any position whose id is already taken.
    #[must_use]
    pub fn next_system_id(&self) -> MessageId {
        let len = self.messages.len();
        // len + 1 candidates against at most len taken ids.
        (len..=len * 2)
            .map(|position| MessageId::system(&self.id, position))
            .find(|candidate| self.messages.iter().all(|m| &m.id != candidate))
            .unwrap_or_else(|| MessageId::system(&self.id, len))
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Text of the last non-system message, used as the list preview.
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.sender != SenderRole::System)
            .and_then(|m| m.text.as_deref())
    }

    /// Status label shown next to the conversation; active threads carry none.
    #[must_use]
    pub const fn badge(&self) -> Option<ConversationStatus> {
        match self.status {
            ConversationStatus::Active => None,
            other => Some(other),
        }
    }

    /// Actions the viewer offers for this conversation.
    #[must_use]
    pub fn available_actions(&self) -> Vec<ModerationAction> {
        ModerationAction::ALL
            .into_iter()
            .filter(|action| match action {
                ModerationAction::Resolve => {
                    self.is_support_ticket && self.status == ConversationStatus::Active
                }
                ModerationAction::Approve | ModerationAction::Lock => {
                    self.status == ConversationStatus::Flagged
                }
                ModerationAction::WarnCustomer | ModerationAction::WarnVendor => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, sender: SenderRole, text: &str) -> Message {
        Message::new(MessageId::new(id).unwrap(), sender, text, Utc::now())
    }

    fn conversation(status: ConversationStatus, messages: Vec<Message>) -> ConsoleResult<Conversation> {
        Conversation::new(
            ConversationId::new("1").unwrap(),
            "CUST001",
            "VDR001",
            status,
            messages,
        )
    }

    #[test]
    fn test_conversation_requires_a_message() {
        assert!(matches!(
            conversation(ConversationStatus::Active, vec![]),
            Err(ConsoleError::InvalidConversation(_))
        ));
    }

    #[test]
    fn test_duplicate_message_ids_rejected() {
        let result = conversation(
            ConversationStatus::Active,
            vec![
                msg("m1", SenderRole::Customer, "hi"),
                msg("m1", SenderRole::Vendor, "hello"),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_preview_skips_system_messages() {
        let mut convo = conversation(
            ConversationStatus::Active,
            vec![
                msg("m1", SenderRole::Customer, "hi"),
                msg("m2", SenderRole::Vendor, "hello there"),
            ],
        )
        .unwrap();
        convo.push_message(Message::system(
            MessageId::new("s1").unwrap(),
            "closed",
            Utc::now(),
        ));
        assert_eq!(convo.preview(), Some("hello there"));
    }

    #[test]
    fn test_available_actions_by_status() {
        let first = vec![msg("m1", SenderRole::Customer, "hi")];

        let flagged = conversation(ConversationStatus::Flagged, first.clone()).unwrap();
        assert_eq!(
            flagged.available_actions(),
            vec![
                ModerationAction::Approve,
                ModerationAction::Lock,
                ModerationAction::WarnCustomer,
                ModerationAction::WarnVendor,
            ]
        );
        assert_eq!(flagged.badge(), Some(ConversationStatus::Flagged));

        let ticket = conversation(ConversationStatus::Active, first)
            .unwrap()
            .as_support_ticket();
        assert_eq!(ticket.available_actions()[0], ModerationAction::Resolve);
        assert_eq!(ticket.badge(), None);
    }
}
