//! Driven port for arrival record persistence.

use async_trait::async_trait;

use crate::domain::arrival::{ArrivalRecord, UpsertArrival};
use crate::domain::user::UserId;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by arrival repository adapters.
    pub enum ArrivalRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "arrival repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "arrival repository query failed: {message}",
        /// The store rejected an insert because the user already declared an
        /// arrival (per-user uniqueness constraint).
        AlreadyDeclared { message: String } =>
            "arrival already exists: {message}",
    }
}

/// Port for the per-user singleton arrival declarations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArrivalRepository: Send + Sync {
    /// Fetch the user's declaration; `None` before the first submission.
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<ArrivalRecord>, ArrivalRepositoryError>;

    /// Insert a fresh declaration, returning it with store-assigned id.
    async fn insert(
        &self,
        user_id: UserId,
        arrival: UpsertArrival,
    ) -> Result<ArrivalRecord, ArrivalRepositoryError>;

    /// Replace an existing declaration, preserving its id.
    async fn update(
        &self,
        id: uuid::Uuid,
        arrival: UpsertArrival,
    ) -> Result<ArrivalRecord, ArrivalRepositoryError>;

    /// Remove the user's declaration; `false` when none existed.
    async fn delete_by_user(&self, user_id: UserId) -> Result<bool, ArrivalRepositoryError>;

    /// All declarations, used for the roster display.
    async fn list(&self) -> Result<Vec<ArrivalRecord>, ArrivalRepositoryError>;
}
