//! Driven port for bed-linen reservation persistence.

use async_trait::async_trait;

use crate::domain::linen::{LinenChoice, LinenReservation};
use crate::domain::user::UserId;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by linen reservation repository adapters.
    pub enum LinenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "linen repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "linen repository query failed: {message}",
        /// The store rejected an insert because the user already holds a
        /// reservation (per-user uniqueness constraint).
        AlreadyReserved { message: String } =>
            "reservation already exists: {message}",
    }
}

/// Port for the per-user singleton linen reservations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinenReservationRepository: Send + Sync {
    /// Fetch the user's reservation; `None` before first sign-up.
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<LinenReservation>, LinenRepositoryError>;

    /// Insert a fresh reservation, returning it with store-assigned id.
    async fn insert(
        &self,
        user_id: UserId,
        choice: LinenChoice,
    ) -> Result<LinenReservation, LinenRepositoryError>;

    /// Replace the choice on an existing reservation, preserving its id.
    async fn update(
        &self,
        id: uuid::Uuid,
        choice: LinenChoice,
    ) -> Result<LinenReservation, LinenRepositoryError>;

    /// All reservations, used for the roster and cost summary.
    async fn list(&self) -> Result<Vec<LinenReservation>, LinenRepositoryError>;
}
