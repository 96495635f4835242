//! Support-ticket deep links.
//!
//! The vendor portal opens a ticket by sending the admin to the chat-log view
//! with the ticket in the query string:
//!
//! `/admin/chat-logs?support_ticket_id=T1&vendorId=VDR001&vendorName=Acme&vendorAvatar=..&initialMessage=..`

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConsoleResult;

/// Path of the chat-log view that accepts ticket links.
pub const CHAT_LOGS_PATH: &str = "/admin/chat-logs";

/// Query parameters of a support-ticket link. Every field is optional on the
/// wire; ingestion decides what is required.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SupportTicketLink {
    /// Ticket identifier; absent means "not a ticket link".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_ticket_id: Option<String>,
    /// Referring vendor id.
    #[serde(default, rename = "vendorId", skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    /// Referring vendor display name.
    #[serde(default, rename = "vendorName", skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    /// Referring vendor avatar reference.
    #[serde(default, rename = "vendorAvatar", skip_serializing_if = "Option::is_none")]
    pub vendor_avatar: Option<String>,
    /// Opening message of the ticket.
    #[serde(default, rename = "initialMessage", skip_serializing_if = "Option::is_none")]
    pub initial_message: Option<String>,
}

/// Borrowed view of a link carrying every field needed to open a ticket.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TicketFields<'a> {
    /// Referring vendor id.
    pub vendor_id: &'a str,
    /// Referring vendor display name.
    pub vendor_name: &'a str,
    /// Referring vendor avatar reference.
    pub vendor_avatar: &'a str,
    /// Opening message of the ticket.
    pub initial_message: &'a str,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).map(str::trim).filter(|v| !v.is_empty())
}

impl SupportTicketLink {
    /// Build a complete link.
    #[must_use]
    pub fn new(
        ticket_id: impl Into<String>,
        vendor_id: impl Into<String>,
        vendor_name: impl Into<String>,
        vendor_avatar: impl Into<String>,
        initial_message: impl Into<String>,
    ) -> Self {
        Self {
            support_ticket_id: Some(ticket_id.into()),
            vendor_id: Some(vendor_id.into()),
            vendor_name: Some(vendor_name.into()),
            vendor_avatar: Some(vendor_avatar.into()),
            initial_message: Some(initial_message.into()),
        }
    }

    /// Parse the parameters out of a raw query string (without the leading `?`).
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut link = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "support_ticket_id" => &mut link.support_ticket_id,
                "vendorId" => &mut link.vendor_id,
                "vendorName" => &mut link.vendor_name,
                "vendorAvatar" => &mut link.vendor_avatar,
                "initialMessage" => &mut link.initial_message,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        link
    }

    /// Parse the parameters out of a full URL.
    ///
    /// # Errors
    /// Returns an error if `raw` is not a valid absolute URL.
    pub fn from_url(raw: &str) -> ConsoleResult<Self> {
        let url = Url::parse(raw)?;
        Ok(Self::from_query(url.query().unwrap_or_default()))
    }

    /// Ticket id, if this is a ticket link.
    #[must_use]
    pub fn ticket_id(&self) -> Option<&str> {
        non_empty(self.support_ticket_id.as_ref())
    }

    /// All fields required to open a new ticket, or `None` if any is missing.
    #[must_use]
    pub fn ticket_fields(&self) -> Option<TicketFields<'_>> {
        Some(TicketFields {
            vendor_id: non_empty(self.vendor_id.as_ref())?,
            vendor_name: non_empty(self.vendor_name.as_ref())?,
            vendor_avatar: non_empty(self.vendor_avatar.as_ref())?,
            initial_message: non_empty(self.initial_message.as_ref())?,
        })
    }

    /// Encode the present parameters as a query string.
    #[must_use]
    pub fn to_query(&self) -> String {
        [
            ("support_ticket_id", &self.support_ticket_id),
            ("vendorId", &self.vendor_id),
            ("vendorName", &self.vendor_name),
            ("vendorAvatar", &self.vendor_avatar),
            ("initialMessage", &self.initial_message),
        ]
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(|v| format!("{key}={}", urlencoding::encode(v)))
        })
        .collect::<Vec<_>>()
        .join("&")
    }

    /// Relative link to the chat-log view carrying this ticket.
    #[must_use]
    pub fn to_path(&self) -> String {
        format!("{CHAT_LOGS_PATH}?{}", self.to_query())
    }
}
