//! PostgreSQL-backed [`IngredientRepository`] implementation using Diesel.
//!
//! Inserts write both the display name and its lowercased form so the
//! `(meal_id, name_normalized)` unique constraint closes the
//! check-then-insert race on case-insensitive duplicates.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ingredient::{Ingredient, IngredientId, IngredientName, NewIngredient};
use crate::domain::meal::MealId;
use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};
use crate::domain::user::UserId;

use super::diesel_helpers::{DieselFailure, classify_diesel_error, collect_rows};
use super::models::{IngredientRow, NewIngredientRow};
use super::pool::{DbPool, PoolError};
use super::schema::ingredients;

/// Diesel-backed implementation of the [`IngredientRepository`] port.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to ingredient repository errors.
fn map_pool_error(error: PoolError) -> IngredientRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            IngredientRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors on read paths to ingredient repository errors.
///
/// Reads never trip the uniqueness constraint; a violation reported here is
/// a plain query failure.
fn map_diesel_error(error: diesel::result::Error) -> IngredientRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => {
            IngredientRepositoryError::connection("database connection error")
        }
        DieselFailure::UniqueViolation { message } => IngredientRepositoryError::query(message),
        DieselFailure::Query { message } => IngredientRepositoryError::query(message),
    }
}

/// Map Diesel errors on the insert path, surfacing uniqueness violations as
/// the duplicate-name variant the service translates into a conflict.
fn map_insert_error(error: diesel::result::Error, name: &IngredientName) -> IngredientRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => {
            IngredientRepositoryError::connection("database connection error")
        }
        DieselFailure::UniqueViolation { .. } => {
            IngredientRepositoryError::duplicate_name(name.as_str())
        }
        DieselFailure::Query { message } => IngredientRepositoryError::query(message),
    }
}

/// Convert a database row to a domain [`Ingredient`].
fn row_to_ingredient(row: IngredientRow) -> Result<Ingredient, String> {
    let name = IngredientName::new(row.name)
        .map_err(|err| format!("ingredient {} failed validation: {err}", row.id))?;
    Ok(Ingredient {
        id: IngredientId::from_uuid(row.id),
        name,
        meal_id: MealId::from_uuid(row.meal_id),
        contributed_by: UserId::from_uuid(row.contributed_by),
        created_at: row.created_at,
    })
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn list_for_meal(
        &self,
        meal_id: MealId,
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::meal_id.eq(meal_id.as_uuid()))
            .select(IngredientRow::as_select())
            .order(ingredients::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(
            rows.into_iter().map(row_to_ingredient),
            IngredientRepositoryError::query,
        )
    }

    async fn list_for_meals(
        &self,
        meal_ids: &[MealId],
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids: Vec<Uuid> = meal_ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::meal_id.eq_any(ids))
            .select(IngredientRow::as_select())
            .order(ingredients::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(
            rows.into_iter().map(row_to_ingredient),
            IngredientRepositoryError::query,
        )
    }

    async fn find_by_id(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq(id.as_uuid()))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_ingredient)
            .transpose()
            .map_err(IngredientRepositoryError::query)
    }

    async fn find_by_normalized_name(
        &self,
        meal_id: MealId,
        normalized: &str,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IngredientRow> = ingredients::table
            .filter(
                ingredients::meal_id
                    .eq(meal_id.as_uuid())
                    .and(ingredients::name_normalized.eq(normalized)),
            )
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_ingredient)
            .transpose()
            .map_err(IngredientRepositoryError::query)
    }

    async fn insert(
        &self,
        ingredient: NewIngredient,
    ) -> Result<Ingredient, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let normalized = ingredient.name.normalized();
        let new_row = NewIngredientRow {
            id: Uuid::new_v4(),
            meal_id: *ingredient.meal_id.as_uuid(),
            name: ingredient.name.as_str(),
            name_normalized: normalized.as_str(),
            contributed_by: *ingredient.contributed_by.as_uuid(),
        };

        let row: IngredientRow = diesel::insert_into(ingredients::table)
            .values(&new_row)
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, &ingredient.name))?;

        row_to_ingredient(row).map_err(IngredientRepositoryError::query)
    }

    async fn delete(&self, id: IngredientId) -> Result<(), IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(ingredients::table.filter(ingredients::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn count_for_meal(&self, meal_id: MealId) -> Result<u64, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = ingredients::table
            .filter(ingredients::meal_id.eq(meal_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, IngredientRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(err, IngredientRepositoryError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    fn insert_surfaces_unique_violation_as_duplicate_name() {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let name = IngredientName::new("Bread").expect("valid name");
        let violation = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );

        let err = map_insert_error(violation, &name);
        assert!(matches!(
            err,
            IngredientRepositoryError::DuplicateName { ref name } if name == "Bread"
        ));
    }

    #[rstest]
    fn row_converts_to_domain_ingredient() {
        let row = IngredientRow {
            id: Uuid::new_v4(),
            meal_id: Uuid::new_v4(),
            name: "Crème fraîche".to_owned(),
            contributed_by: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        let meal_id = row.meal_id;

        let ingredient = row_to_ingredient(row).expect("valid row");
        assert_eq!(ingredient.name.as_str(), "Crème fraîche");
        assert_eq!(ingredient.meal_id, MealId::from_uuid(meal_id));
    }

    #[rstest]
    fn blank_stored_name_is_rejected() {
        let row = IngredientRow {
            id: Uuid::new_v4(),
            meal_id: Uuid::new_v4(),
            name: "   ".to_owned(),
            contributed_by: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let message = row_to_ingredient(row).expect_err("blank name must fail");
        assert!(message.contains("failed validation"));
    }
}
