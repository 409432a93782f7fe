//! Driving port for bed-linen sign-up use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::linen::{LinenChoice, LinenReservation, LinenSummary};
use crate::domain::user::{DisplayName, UserId};

/// A reservation resolved to its owner's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinenRosterEntry {
    /// The ledger row.
    pub reservation: LinenReservation,
    /// Display name of the reserving user.
    pub display_name: DisplayName,
}

/// Roster of every reservation plus the derived rental totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinenRoster {
    /// All current sign-ups.
    pub entries: Vec<LinenRosterEntry>,
    /// Totals recomputed from `entries`.
    pub summary: LinenSummary,
}

/// Domain use-case port for linen reservations.
#[async_trait]
pub trait LinenSignup: Send + Sync {
    /// The user's own reservation; `None` before first sign-up.
    async fn reservation_for(&self, user_id: UserId) -> Result<Option<LinenReservation>, Error>;

    /// Create or update the user's reservation, returning the authoritative
    /// stored record. Updates preserve the record's id.
    async fn upsert(&self, user_id: UserId, choice: LinenChoice)
    -> Result<LinenReservation, Error>;

    /// Every sign-up with attribution, plus derived rental totals.
    async fn roster(&self) -> Result<LinenRoster, Error>;
}

/// In-memory linen sign-up used by handler tests: empty roster, upserts
/// echo back a record with a fixed id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLinenSignup;

#[async_trait]
impl LinenSignup for FixtureLinenSignup {
    async fn reservation_for(&self, _user_id: UserId) -> Result<Option<LinenReservation>, Error> {
        Ok(None)
    }

    async fn upsert(
        &self,
        user_id: UserId,
        choice: LinenChoice,
    ) -> Result<LinenReservation, Error> {
        Ok(LinenReservation {
            id: Uuid::nil(),
            user_id,
            choice,
        })
    }

    async fn roster(&self) -> Result<LinenRoster, Error> {
        Ok(LinenRoster {
            entries: Vec::new(),
            summary: LinenSummary::from_reservations(&[]),
        })
    }
}
