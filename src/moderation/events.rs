//! Event-list view of the store.
//!
//! Every operation the viewer can trigger is a [`ModerationEvent`]; folding a
//! list of events over the same seed with the same clock always yields the same
//! store.

use serde::{Deserialize, Serialize};

use crate::moderation::core::action::ModerationAction;
use crate::moderation::core::ids::ConversationId;
use crate::moderation::deep_link::SupportTicketLink;
use crate::moderation::store::{ActionOutcome, IngestOutcome, ModerationStore};

/// One UI event addressed to the store.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ModerationEvent {
    /// Select a conversation.
    Select {
        /// Target conversation.
        id: ConversationId,
    },
    /// Apply an action to a specific conversation.
    Apply {
        /// Target conversation.
        id: ConversationId,
        /// Action to apply.
        action: ModerationAction,
    },
    /// Apply an action to the selected conversation.
    ApplySelected {
        /// Action to apply.
        action: ModerationAction,
    },
    /// Ingest a support-ticket link.
    Ingest {
        /// Link parameters.
        link: SupportTicketLink,
    },
    /// Select the first conversation if nothing is selected.
    DefaultSelect,
}

/// Result of dispatching one event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventOutcome {
    /// Result of a selection event.
    Selected(bool),
    /// Result of an action event.
    Action(ActionOutcome),
    /// Result of an ingestion event.
    Ingest(IngestOutcome),
}

impl ModerationStore {
    /// Dispatch a single event.
    pub fn dispatch(&mut self, event: &ModerationEvent) -> EventOutcome {
        match event {
            ModerationEvent::Select { id } => EventOutcome::Selected(self.select(id)),
            ModerationEvent::Apply { id, action } => {
                EventOutcome::Action(self.apply_action(id, *action))
            }
            ModerationEvent::ApplySelected { action } => {
                EventOutcome::Action(self.apply_to_selected(*action))
            }
            ModerationEvent::Ingest { link } => {
                EventOutcome::Ingest(self.ingest_support_ticket(link))
            }
            ModerationEvent::DefaultSelect => {
                EventOutcome::Selected(self.ensure_default_selection().is_some())
            }
        }
    }

    /// Dispatch events in order, returning one outcome per event.
    pub fn replay<'a, I>(&mut self, events: I) -> Vec<EventOutcome>
    where
        I: IntoIterator<Item = &'a ModerationEvent>,
    {
        events.into_iter().map(|event| self.dispatch(event)).collect()
    }
}
