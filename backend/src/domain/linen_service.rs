//! Bed-linen sign-up domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::linen::{LinenChoice, LinenReservation, LinenSummary};
use crate::domain::meal_planning_service::map_directory_error;
use crate::domain::ports::{
    LinenRepositoryError, LinenReservationRepository, LinenRoster, LinenRosterEntry, LinenSignup,
    UserDirectory,
};
use crate::domain::user::{DisplayName, UserId};

/// Linen sign-up service enforcing one reservation per user.
#[derive(Clone)]
pub struct LinenSignupService<L, U> {
    reservations: Arc<L>,
    users: Arc<U>,
}

impl<L, U> LinenSignupService<L, U> {
    /// Create a new service with the given repositories.
    pub const fn new(reservations: Arc<L>, users: Arc<U>) -> Self {
        Self {
            reservations,
            users,
        }
    }
}

fn map_linen_error(error: LinenRepositoryError) -> Error {
    match error {
        LinenRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("linen ledger unavailable: {message}"))
        }
        LinenRepositoryError::Query { message } => {
            Error::internal(format!("linen ledger error: {message}"))
        }
        // A racing first sign-up hit the per-user constraint; the caller can
        // simply retry, which will take the update path.
        LinenRepositoryError::AlreadyReserved { message } => {
            Error::duplicate_item(format!("reservation already exists: {message}"))
        }
    }
}

#[async_trait]
impl<L, U> LinenSignup for LinenSignupService<L, U>
where
    L: LinenReservationRepository,
    U: UserDirectory,
{
    async fn reservation_for(&self, user_id: UserId) -> Result<Option<LinenReservation>, Error> {
        self.reservations
            .find_by_user(user_id)
            .await
            .map_err(map_linen_error)
    }

    async fn upsert(
        &self,
        user_id: UserId,
        choice: LinenChoice,
    ) -> Result<LinenReservation, Error> {
        let existing = self
            .reservations
            .find_by_user(user_id)
            .await
            .map_err(map_linen_error)?;

        match existing {
            Some(reservation) => self
                .reservations
                .update(reservation.id, choice)
                .await
                .map_err(map_linen_error),
            None => self
                .reservations
                .insert(user_id, choice)
                .await
                .map_err(map_linen_error),
        }
    }

    async fn roster(&self) -> Result<LinenRoster, Error> {
        let reservations = self.reservations.list().await.map_err(map_linen_error)?;
        let summary = LinenSummary::from_reservations(&reservations);

        let ids: Vec<UserId> = reservations
            .iter()
            .map(|reservation| reservation.user_id)
            .collect();
        let names = self
            .users
            .display_names(&ids)
            .await
            .map_err(map_directory_error)?;

        let entries = reservations
            .into_iter()
            .map(|reservation| {
                let display_name = names
                    .get(&reservation.user_id)
                    .cloned()
                    .unwrap_or_else(DisplayName::unknown);
                LinenRosterEntry {
                    reservation,
                    display_name,
                }
            })
            .collect();

        Ok(LinenRoster { entries, summary })
    }
}

#[cfg(test)]
#[path = "linen_service_tests.rs"]
mod tests;
