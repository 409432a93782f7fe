//! Arrival-time coordination records.
//!
//! Each user declares at most one estimated arrival with a transport mode
//! and optional free-text notes. Records follow the same create-or-update
//! lifecycle as linen reservations, and may additionally be withdrawn.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Validation errors returned by the arrival constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrivalValidationError {
    /// Unrecognised transport mode label in inbound data.
    UnknownTransportMode,
}

impl fmt::Display for ArrivalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTransportMode => write!(f, "transport mode must be car or train"),
        }
    }
}

impl std::error::Error for ArrivalValidationError {}

/// How a user plans to travel to the cabin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Driving up by car.
    Car,
    /// Taking the train.
    Train,
}

impl TransportMode {
    /// Stable label used for persistence and the HTTP surface.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Train => "train",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = ArrivalValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(Self::Car),
            "train" => Ok(Self::Train),
            _ => Err(ArrivalValidationError::UnknownTransportMode),
        }
    }
}

/// A user's singleton arrival declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalRecord {
    /// Ledger identifier, preserved across updates.
    pub id: Uuid,
    /// Owning user; unique across the ledger.
    pub user_id: UserId,
    /// Estimated arrival at the cabin.
    pub arrives_at: DateTime<Utc>,
    /// Declared transport mode.
    pub transport: TransportMode,
    /// Free-text notes; empty string when none were given.
    pub notes: String,
}

/// Parameters for creating or replacing a user's arrival declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertArrival {
    /// Estimated arrival at the cabin.
    pub arrives_at: DateTime<Utc>,
    /// Declared transport mode.
    pub transport: TransportMode,
    /// Optional notes; `None` is stored as an empty string.
    pub notes: Option<String>,
}

impl UpsertArrival {
    /// Notes with the optional layer collapsed to the stored representation.
    #[must_use]
    pub fn notes_or_empty(&self) -> String {
        self.notes.clone().unwrap_or_default()
    }
}
