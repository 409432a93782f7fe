//! Driven port for the meal catalog.
//!
//! The catalog is fixed for the duration of a trip and created by trip
//! setup, so the port only exposes reads.

use async_trait::async_trait;

use crate::domain::meal::{Meal, MealId};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by meal repository adapters.
    pub enum MealRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "meal repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "meal repository query failed: {message}",
    }
}

/// Port for reading the trip's meal catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Every meal planned for the trip, in catalog order.
    async fn list(&self) -> Result<Vec<Meal>, MealRepositoryError>;

    /// Fetch one meal; `None` when the id is unknown.
    async fn find_by_id(&self, id: MealId) -> Result<Option<Meal>, MealRepositoryError>;
}
