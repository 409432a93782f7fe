//! Arrival coordination domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::arrival::{ArrivalRecord, UpsertArrival};
use crate::domain::error::Error;
use crate::domain::meal_planning_service::map_directory_error;
use crate::domain::ports::{
    ArrivalBoard, ArrivalRepository, ArrivalRepositoryError, ArrivalRosterEntry, UserDirectory,
};
use crate::domain::user::{DisplayName, UserId};

/// Arrival board service enforcing one declaration per user.
#[derive(Clone)]
pub struct ArrivalBoardService<A, U> {
    arrivals: Arc<A>,
    users: Arc<U>,
}

impl<A, U> ArrivalBoardService<A, U> {
    /// Create a new service with the given repositories.
    pub const fn new(arrivals: Arc<A>, users: Arc<U>) -> Self {
        Self { arrivals, users }
    }
}

fn map_arrival_error(error: ArrivalRepositoryError) -> Error {
    match error {
        ArrivalRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("arrival ledger unavailable: {message}"))
        }
        ArrivalRepositoryError::Query { message } => {
            Error::internal(format!("arrival ledger error: {message}"))
        }
        ArrivalRepositoryError::AlreadyDeclared { message } => {
            Error::duplicate_item(format!("arrival already exists: {message}"))
        }
    }
}

#[async_trait]
impl<A, U> ArrivalBoard for ArrivalBoardService<A, U>
where
    A: ArrivalRepository,
    U: UserDirectory,
{
    async fn arrival_for(&self, user_id: UserId) -> Result<Option<ArrivalRecord>, Error> {
        self.arrivals
            .find_by_user(user_id)
            .await
            .map_err(map_arrival_error)
    }

    async fn upsert(
        &self,
        user_id: UserId,
        arrival: UpsertArrival,
    ) -> Result<ArrivalRecord, Error> {
        let existing = self
            .arrivals
            .find_by_user(user_id)
            .await
            .map_err(map_arrival_error)?;

        match existing {
            Some(record) => self
                .arrivals
                .update(record.id, arrival)
                .await
                .map_err(map_arrival_error),
            None => self
                .arrivals
                .insert(user_id, arrival)
                .await
                .map_err(map_arrival_error),
        }
    }

    async fn withdraw(&self, user_id: UserId) -> Result<(), Error> {
        let deleted = self
            .arrivals
            .delete_by_user(user_id)
            .await
            .map_err(map_arrival_error)?;
        if !deleted {
            debug!(%user_id, "withdraw requested with no arrival on record");
        }
        Ok(())
    }

    async fn roster(&self) -> Result<Vec<ArrivalRosterEntry>, Error> {
        let records = self.arrivals.list().await.map_err(map_arrival_error)?;

        let ids: Vec<UserId> = records.iter().map(|record| record.user_id).collect();
        let names = self
            .users
            .display_names(&ids)
            .await
            .map_err(map_directory_error)?;

        Ok(records
            .into_iter()
            .map(|record| {
                let display_name = names
                    .get(&record.user_id)
                    .cloned()
                    .unwrap_or_else(DisplayName::unknown);
                ArrivalRosterEntry {
                    record,
                    display_name,
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "arrival_service_tests.rs"]
mod tests;
