//! Driven port for ingredient ledger persistence.

use async_trait::async_trait;

use crate::domain::ingredient::{Ingredient, IngredientId, NewIngredient};
use crate::domain::meal::MealId;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by ingredient repository adapters.
    pub enum IngredientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ingredient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "ingredient repository query failed: {message}",
        /// The store rejected an insert because the meal already lists the
        /// name (backend uniqueness constraint closing the check-then-insert
        /// race).
        DuplicateName { name: String } =>
            "ingredient {name} already exists for this meal",
    }
}

/// Port for ingredient storage and retrieval.
///
/// Reads for the aggregation view go through [`list_for_meals`] so the whole
/// trip can be fetched in one batched call rather than per meal.
///
/// [`list_for_meals`]: IngredientRepository::list_for_meals
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Ingredients of a single meal, oldest first.
    async fn list_for_meal(
        &self,
        meal_id: MealId,
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError>;

    /// Batched read across several meals, used to derive the shopping list.
    async fn list_for_meals(
        &self,
        meal_ids: &[MealId],
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError>;

    /// Fetch one ingredient; `None` when the id is unknown.
    async fn find_by_id(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError>;

    /// Case-insensitive duplicate probe within one meal. `normalized` is the
    /// lowercased-trimmed name form.
    async fn find_by_normalized_name(
        &self,
        meal_id: MealId,
        normalized: &str,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError>;

    /// Insert a new row, returning it with store-assigned id and timestamp.
    async fn insert(
        &self,
        ingredient: NewIngredient,
    ) -> Result<Ingredient, IngredientRepositoryError>;

    /// Delete one row. Missing rows are not an error at this layer; owners
    /// are checked by the service before calling.
    async fn delete(&self, id: IngredientId) -> Result<(), IngredientRepositoryError>;

    /// Cheap row count for one meal's summary line.
    async fn count_for_meal(&self, meal_id: MealId) -> Result<u64, IngredientRepositoryError>;
}
