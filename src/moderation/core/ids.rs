// File: src/moderation/core/ids.rs

//! Identifier types for the moderation store.
//!
//! Conversation and message identifiers are opaque strings: seed data uses
//! short numeric ids (`"1"`, `"2"`) while support tickets arrive with ids
//! chosen by the vendor portal (`"T1"`, `"TKT-8812"`). The newtypes keep the two
//! from being mixed up and validate the raw value once at the boundary.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors returned when parsing/validating a textual identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// Empty (or whitespace-only) identifier.
    Empty,
    /// Exceeds the maximum accepted length.
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length received.
        got: usize,
    },
    /// Contains a control character.
    InvalidChar {
        /// The invalid character.
        ch: char,
        /// The index where it was found.
        index: usize,
    },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::TooLong { max, got } => write!(f, "identifier too long: got {got}, max {max}"),
            Self::InvalidChar { ch, index } => {
                write!(f, "identifier contains invalid character {ch:?} at index {index}")
            }
        }
    }
}

impl std::error::Error for IdError {}

/// Hard ceiling to prevent pathological payloads.
pub const MAX_ID_LEN: usize = 128;

fn validate_id(raw: &str) -> Result<String, IdError> {
    let s = raw.trim();

    if s.is_empty() {
        return Err(IdError::Empty);
    }
    if s.len() > MAX_ID_LEN {
        return Err(IdError::TooLong {
            max: MAX_ID_LEN,
            got: s.len(),
        });
    }
    if let Some((index, ch)) = s.chars().enumerate().find(|(_, ch)| ch.is_control()) {
        return Err(IdError::InvalidChar { ch, index });
    }

    Ok(s.to_owned())
}

/// Declare a string identifier newtype with a consistent API.
macro_rules! define_text_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Build a validated identifier.
            ///
            /// # Errors
            /// Returns `IdError` if the input is empty, too long, or contains control characters.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, IdError> {
                validate_id(raw.as_ref()).map(Self)
            }

            /// Borrow as `&str`.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume into `String`.
            #[inline]
            #[must_use]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.into_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_text_id!(
    /// Identifier of a conversation (or support ticket) in the store.
    ConversationId
);

define_text_id!(
    /// Identifier of a message, unique within its conversation.
    MessageId
);

impl MessageId {
    /// Derive the id of a system message from its conversation and position.
    ///
    /// Position-derived ids keep replays deterministic.
    #[must_use]
    pub fn system(conversation: &ConversationId, position: usize) -> Self {
        Self(format!("sys-{conversation}-{position}"))
    }

    /// Derive the id of the seeded message of a support ticket.
    #[must_use]
    pub fn support_seed(conversation: &ConversationId) -> Self {
        Self(format!("msg-support-{conversation}"))
    }
}
