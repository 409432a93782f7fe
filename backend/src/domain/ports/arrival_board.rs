//! Driving port for arrival coordination use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::arrival::{ArrivalRecord, UpsertArrival};
use crate::domain::error::Error;
use crate::domain::user::{DisplayName, UserId};

/// An arrival declaration resolved to its owner's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalRosterEntry {
    /// The ledger row.
    pub record: ArrivalRecord,
    /// Display name of the declaring user.
    pub display_name: DisplayName,
}

/// Domain use-case port for arrival declarations.
#[async_trait]
pub trait ArrivalBoard: Send + Sync {
    /// The user's own declaration; `None` before the first submission.
    async fn arrival_for(&self, user_id: UserId) -> Result<Option<ArrivalRecord>, Error>;

    /// Create or update the user's declaration, returning the authoritative
    /// stored record. Updates preserve the record's id.
    async fn upsert(&self, user_id: UserId, arrival: UpsertArrival)
    -> Result<ArrivalRecord, Error>;

    /// Withdraw the user's declaration. Withdrawing an absent record is a
    /// no-op, never an error.
    async fn withdraw(&self, user_id: UserId) -> Result<(), Error>;

    /// Every declaration with attribution, for the roster display.
    async fn roster(&self) -> Result<Vec<ArrivalRosterEntry>, Error>;
}

/// In-memory arrival board used by handler tests: empty roster, upserts
/// echo back a record with a fixed id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureArrivalBoard;

#[async_trait]
impl ArrivalBoard for FixtureArrivalBoard {
    async fn arrival_for(&self, _user_id: UserId) -> Result<Option<ArrivalRecord>, Error> {
        Ok(None)
    }

    async fn upsert(
        &self,
        user_id: UserId,
        arrival: UpsertArrival,
    ) -> Result<ArrivalRecord, Error> {
        let notes = arrival.notes_or_empty();
        Ok(ArrivalRecord {
            id: Uuid::nil(),
            user_id,
            arrives_at: arrival.arrives_at,
            transport: arrival.transport,
            notes,
        })
    }

    async fn withdraw(&self, _user_id: UserId) -> Result<(), Error> {
        Ok(())
    }

    async fn roster(&self) -> Result<Vec<ArrivalRosterEntry>, Error> {
        Ok(Vec::new())
    }
}
