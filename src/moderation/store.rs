//! In-memory conversation moderation store.
//!
//! Holds the conversations shown in the admin chat-log view, the current
//! selection, and applies moderation actions through the transition table.
//! Every operation is synchronous and runs to completion; lookups that miss are
//! reported as outcomes, never as errors.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ConsoleError, ConsoleResult};
use crate::moderation::clock::{Clock, SystemClock};
use crate::moderation::core::action::{ModerationAction, WarnTarget, transition};
use crate::moderation::core::config::{AdminIdentity, ModerationConfig, ModerationPolicy};
use crate::moderation::core::conversation::{Conversation, Message};
use crate::moderation::core::ids::{ConversationId, MessageId};
use crate::moderation::core::status::{ConversationStatus, SenderRole};
use crate::moderation::deep_link::SupportTicketLink;
use crate::moderation::notify::{Notifier, TracingNotifier, WarningNotice};
use crate::moderation::seed;

/// Admin-facing confirmation of an action (rendered as a toast by the viewer).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Feedback {
    /// Short heading.
    pub title: String,
    /// Sentence describing what happened.
    pub description: String,
    /// Whether the action is destructive.
    pub destructive: bool,
}

impl Feedback {
    fn new(title: &str, description: String, destructive: bool) -> Self {
        Self {
            title: title.to_string(),
            description,
            destructive,
        }
    }

    fn for_action(action: ModerationAction, conversation: &Conversation) -> Self {
        let customer = &conversation.customer_id;
        let vendor = &conversation.vendor_id;
        match action {
            ModerationAction::WarnCustomer => Self::new(
                "Action Taken",
                format!("A warning has been sent to {customer}."),
                false,
            ),
            ModerationAction::WarnVendor => Self::new(
                "Action Taken",
                format!("A warning has been sent to {vendor}."),
                false,
            ),
            ModerationAction::Approve => Self::new(
                "Chat Approved",
                format!("The conversation between {customer} and {vendor} has been re-enabled."),
                false,
            ),
            ModerationAction::Lock => Self::new(
                "Chat Locked",
                format!(
                    "The conversation between {customer} and {vendor} has been permanently locked."
                ),
                true,
            ),
            ModerationAction::Resolve => Self::new(
                "Ticket Resolved",
                format!("The support ticket from {customer} has been closed."),
                false,
            ),
        }
    }
}

/// What an applied action did to its conversation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ActionReport {
    /// Target conversation.
    pub conversation_id: ConversationId,
    /// Action that was applied.
    pub action: ModerationAction,
    /// Status before the action.
    pub previous: ConversationStatus,
    /// Status after the action.
    pub status: ConversationStatus,
    /// Id of the system message appended, if any.
    pub appended: Option<MessageId>,
    /// Warning handed to the notifier, if any.
    pub notice: Option<WarningNotice>,
    /// Confirmation for the admin; `None` when the action had no effect.
    pub feedback: Option<Feedback>,
}

impl ActionReport {
    /// Whether the action had any effect.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.feedback.is_none()
    }
}

/// Outcome of [`ModerationStore::apply_action`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The action ran (possibly as a no-op for the current status).
    Applied(ActionReport),
    /// No conversation with that id.
    NotFound,
    /// Applied to the selection while nothing was selected.
    NothingSelected,
}

impl ActionOutcome {
    /// Report of the applied action, if it ran.
    #[must_use]
    pub const fn report(&self) -> Option<&ActionReport> {
        match self {
            Self::Applied(report) => Some(report),
            Self::NotFound | Self::NothingSelected => None,
        }
    }
}

/// Outcome of [`ModerationStore::ingest_support_ticket`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "conversation_id", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// A new support ticket was created, inserted first and selected.
    Created(ConversationId),
    /// The ticket already existed and is now selected.
    Selected(ConversationId),
    /// Required fields were missing or invalid; no conversation was added and
    /// default selection was applied.
    Incomplete,
    /// The link carried no ticket id; default selection was applied.
    NotATicket,
}

/// Conversations under moderation plus the current selection.
pub struct ModerationStore {
    conversations: Vec<Conversation>,
    selected: Option<ConversationId>,
    policy: ModerationPolicy,
    admin: AdminIdentity,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl ModerationStore {
    /// Create a store over `conversations`, kept in the given order.
    ///
    /// # Errors
    /// Returns an error if a conversation is invalid or two share an id.
    pub fn new(conversations: Vec<Conversation>) -> ConsoleResult<Self> {
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

        Ok(Self {
            conversations,
            selected: None,
            policy: ModerationPolicy::default(),
            admin: AdminIdentity::default(),
            notifier: Arc::new(TracingNotifier),
            clock: Arc::new(SystemClock),
        })
    }

    /// Build a store from configuration, loading the seed file if one is set.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the seed cannot be loaded.
    pub fn from_config(
        config: &ModerationConfig,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> ConsoleResult<Self> {
        config.validate()?;

        let conversations = match &config.seed_path {
            Some(path) => seed::load_from_file(path)?,
            None => seed::builtin(clock.as_ref())?,
        };

        Ok(Self::new(conversations)?
            .with_policy(config.policy)
            .with_admin(config.admin.clone())
            .with_notifier(notifier)
            .with_clock(clock))
    }

    /// Override the transition policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ModerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the admin identity used for support tickets.
    #[must_use]
    pub fn with_admin(mut self, admin: AdminIdentity) -> Self {
        self.admin = admin;
        self
    }

    /// Override the warning side channel.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Override the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Conversations in display order.
    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Number of conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// Whether the store holds no conversations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Look up a conversation.
    #[must_use]
    pub fn get(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| &c.id == id)
    }

    fn get_mut(&mut self, id: &ConversationId) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| &c.id == id)
    }

    /// Current policy.
    #[must_use]
    pub const fn policy(&self) -> &ModerationPolicy {
        &self.policy
    }

    /// Id of the selected conversation.
    #[must_use]
    pub const fn selected_id(&self) -> Option<&ConversationId> {
        self.selected.as_ref()
    }

    /// The selected conversation.
    #[must_use]
    pub fn selected(&self) -> Option<&Conversation> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Select `id` if it exists. Returns whether the selection changed to `id`.
    pub fn select(&mut self, id: &ConversationId) -> bool {
        if self.get(id).is_none() {
            debug!(conversation = %id, "select ignored: unknown conversation");
            return false;
        }
        self.selected = Some(id.clone());
        debug!(conversation = %id, "conversation selected");
        true
    }

    /// Select the first conversation when nothing is selected yet.
    pub fn ensure_default_selection(&mut self) -> Option<&ConversationId> {
        if self.selected.is_none() {
            self.selected = self.conversations.first().map(|c| c.id.clone());
        }
        self.selected.as_ref()
    }

    /// Apply `action` to the selected conversation.
    pub fn apply_to_selected(&mut self, action: ModerationAction) -> ActionOutcome {
        let Some(id) = self.selected.clone() else {
            debug!(%action, "action ignored: nothing selected");
            return ActionOutcome::NothingSelected;
        };
        self.apply_action(&id, action)
    }

    /// Apply `action` to conversation `id` through the transition table.
    pub fn apply_action(&mut self, id: &ConversationId, action: ModerationAction) -> ActionOutcome {
        let policy = self.policy;
        let now = self.clock.now();

        let Some(conversation) = self.get_mut(id) else {
            debug!(conversation = %id, %action, "action ignored: unknown conversation");
            return ActionOutcome::NotFound;
        };

        let previous = conversation.status;
        let step = transition(previous, action, conversation.is_support_ticket, policy);

        if step.is_noop(previous) {
            debug!(conversation = %id, %action, status = %previous, "action has no effect");
            return ActionOutcome::Applied(ActionReport {
                conversation_id: id.clone(),
                action,
                previous,
                status: previous,
                appended: None,
                notice: None,
                feedback: None,
            });
        }

        conversation.status = step.next;

        let appended = step.system_message.map(|text| {
            let message_id = conversation.next_system_id();
            conversation.push_message(Message::system(message_id.clone(), text, now));
            message_id
        });

        let notice = step.notify.map(|target| {
            let recipient = match target {
                WarnTarget::Customer => &conversation.customer_id,
                WarnTarget::Vendor => &conversation.vendor_id,
            };
            WarningNotice::new(conversation.id.clone(), target, recipient)
        });

        let feedback = Feedback::for_action(action, conversation);

        if previous != step.next {
            info!(
                conversation = %id,
                %action,
                from = %previous,
                to = %step.next,
                "conversation status changed"
            );
        }

        if let Some(notice) = &notice {
            self.notifier.notify(notice);
        }

        ActionOutcome::Applied(ActionReport {
            conversation_id: id.clone(),
            action,
            previous,
            status: step.next,
            appended,
            notice,
            feedback: Some(feedback),
        })
    }

    /// An unusable ticket link adds nothing; the view falls back to the default selection.
    fn decline_ticket(&mut self) -> IngestOutcome {
        self.ensure_default_selection();
        IngestOutcome::Incomplete
    }

    /// Open (or re-open) the support ticket described by `link`.
    ///
    /// Existing tickets are only selected, so repeated ingestion of the same
    /// link never duplicates a conversation.
    pub fn ingest_support_ticket(&mut self, link: &SupportTicketLink) -> IngestOutcome {
        let Some(raw_id) = link.ticket_id() else {
            self.ensure_default_selection();
            return IngestOutcome::NotATicket;
        };

        let Ok(id) = ConversationId::new(raw_id) else {
            debug!(ticket = raw_id, "ticket link ignored: invalid id");
            return self.decline_ticket();
        };

        if self.select(&id) {
            return IngestOutcome::Selected(id);
        }

        let Some(fields) = link.ticket_fields() else {
            debug!(ticket = %id, "ticket link ignored: missing fields");
            return self.decline_ticket();
        };

        let opening = Message::new(
            MessageId::support_seed(&id),
            SenderRole::Customer,
            fields.initial_message,
            self.clock.now(),
        );

        let conversation = match Conversation::new(
            id.clone(),
            fields.vendor_name,
            self.admin.display_id.clone(),
            ConversationStatus::Active,
            vec![opening],
        ) {
            Ok(c) => c
                .with_avatars(fields.vendor_avatar, self.admin.avatar.clone())
                .as_support_ticket(),
            Err(err) => {
                debug!(ticket = %id, error = %err, "ticket link ignored");
                return self.decline_ticket();
            }
        };

        self.conversations.insert(0, conversation);
        self.selected = Some(id.clone());
        info!(ticket = %id, vendor = fields.vendor_id, "support ticket opened");
        IngestOutcome::Created(id)
    }
}
