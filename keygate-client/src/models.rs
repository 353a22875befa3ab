//! Wire data models for the license service.
//!
//! Everything here is an immutable snapshot of server state at the time of
//! the call; callers needing fresh values re-query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The decrypted response envelope every operation parses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Outcome code; 0 means success.
    pub code: i32,
    /// Human-readable outcome message.
    pub message: String,
    /// Operation-specific payload, when the outcome carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Lifecycle status of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    /// Administratively frozen; all operations fail until unfrozen.
    Frozen,
    /// Activated by a first login.
    Activated,
    /// Issued but never used.
    NotActivated,
}

/// A card/license record as returned by login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: u64,
    pub card_key: String,
    #[serde(default)]
    pub activated: bool,
    #[serde(default)]
    pub activated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub frozen: bool,
    /// Granted duration in seconds; 0 means untimed.
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub expire_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub card_type: String,
    /// Opaque caller-managed payload.
    #[serde(default)]
    pub custom_data: String,
    /// Devices currently bound to this card.
    #[serde(default)]
    pub hwid_list: Vec<String>,
    /// IP addresses currently bound to this card.
    #[serde(default)]
    pub ip_list: Vec<String>,
    /// Device binding cap; -1 means unlimited.
    #[serde(default = "unlimited")]
    pub max_hwid: i32,
    /// IP binding cap; -1 means unlimited.
    #[serde(default = "unlimited")]
    pub max_ip: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn unlimited() -> i32 {
    -1
}

impl CardRecord {
    /// True when an activated, timed card is past its expiry.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        if !self.activated || self.duration == 0 {
            return false;
        }
        match self.expire_at {
            Some(expire_at) => Utc::now() > expire_at,
            None => false,
        }
    }

    /// The card's lifecycle status. Frozen wins over activation state.
    #[must_use]
    pub fn status(&self) -> CardStatus {
        if self.frozen {
            CardStatus::Frozen
        } else if self.activated {
            CardStatus::Activated
        } else {
            CardStatus::NotActivated
        }
    }

    /// True when another device may still be bound.
    #[must_use]
    pub fn can_bind_hwid(&self) -> bool {
        self.max_hwid == -1 || (self.hwid_list.len() as i64) < i64::from(self.max_hwid)
    }

    /// True when another IP may still be bound.
    #[must_use]
    pub fn can_bind_ip(&self) -> bool {
        self.max_ip == -1 || (self.ip_list.len() as i64) < i64::from(self.max_ip)
    }
}

/// A successful login: the issued session token plus the card snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub token: String,
    pub expire_at: DateTime<Utc>,
    pub card: CardRecord,
}

/// A remote key-value entry scoped to the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudVariable {
    pub id: u64,
    pub project_id: u64,
    pub key: String,
    pub value: String,
}

/// Project metadata, fetched on demand and never cached by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub uuid: String,
    pub name: String,
    pub version: String,
    pub update_url: String,
}
