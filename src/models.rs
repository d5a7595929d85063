//! Data models for contact history
//!
//! Only a phone number and a timestamp are ever persisted. Message bodies and
//! message direction stay with the caller.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `history` table: the latest known interaction with a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Surrogate key assigned by the store, never used for lookups
    pub id: i64,
    /// Phone number, at most 15 characters
    pub tel: String,
    /// Time of the most recent message sent to or received from `tel`, in UTC
    pub last_message: DateTime<Utc>,
}

/// Whether a message was sent to or received from the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Outgoing message
    Sent,
    /// Incoming message
    Received,
}

impl Direction {
    /// Label used in logs and metrics
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message observed by the SMS-handling process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsEvent {
    /// Remote phone number
    pub tel: String,
    /// When the message was sent or received
    pub timestamp: DateTime<Utc>,
    /// Message direction, not persisted
    pub direction: Direction,
}

impl SmsEvent {
    /// Event for a message sent to `tel`
    #[must_use]
    pub fn sent(tel: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            tel: tel.into(),
            timestamp,
            direction: Direction::Sent,
        }
    }

    /// Event for a message received from `tel`
    #[must_use]
    pub fn received(tel: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            tel: tel.into(),
            timestamp,
            direction: Direction::Received,
        }
    }
}
