//! PostgreSQL-backed [`MealRepository`] implementation using Diesel.
//!
//! The meal catalog is read-only at this layer; trip setup seeds the table
//! through migrations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use url::Url;

use crate::domain::meal::{Meal, MealId};
use crate::domain::ports::{MealRepository, MealRepositoryError};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, collect_rows};
use super::models::MealRow;
use super::pool::{DbPool, PoolError};
use super::schema::meals;

/// Diesel-backed implementation of the [`MealRepository`] port.
#[derive(Clone)]
pub struct DieselMealRepository {
    pool: DbPool,
}

impl DieselMealRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to meal repository errors.
fn map_pool_error(error: PoolError) -> MealRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            MealRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to meal repository errors.
fn map_diesel_error(error: diesel::result::Error) -> MealRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => MealRepositoryError::connection("database connection error"),
        // The catalog has no unique constraint an insert could trip at this
        // layer; treat any violation as a plain query failure.
        DieselFailure::UniqueViolation { message } => MealRepositoryError::query(message),
        DieselFailure::Query { message } => MealRepositoryError::query(message),
    }
}

/// Convert a database row to a domain [`Meal`].
fn row_to_meal(row: MealRow) -> Result<Meal, String> {
    let id = MealId::from_uuid(row.id);
    let meal = match row.menu_url {
        Some(raw) => {
            let menu_url = Url::parse(&raw)
                .map_err(|err| format!("meal {id} has an invalid menu url: {err}"))?;
            Meal::external_menu(id, row.name, row.scheduled_for, menu_url)
        }
        None => Meal::tracked(id, row.name, row.scheduled_for),
    };
    meal.map_err(|err| format!("meal {id} failed validation: {err}"))
}

#[async_trait]
impl MealRepository for DieselMealRepository {
    async fn list(&self) -> Result<Vec<Meal>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MealRow> = meals::table
            .select(MealRow::as_select())
            .order((meals::scheduled_for.asc(), meals::name.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(
            rows.into_iter().map(row_to_meal),
            MealRepositoryError::query,
        )
    }

    async fn find_by_id(&self, id: MealId) -> Result<Option<Meal>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<MealRow> = meals::table
            .filter(meals::id.eq(id.as_uuid()))
            .select(MealRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_meal)
            .transpose()
            .map_err(MealRepositoryError::query)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, MealRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(err, MealRepositoryError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_without_menu_url_converts_to_tracked_meal() {
        let row = MealRow {
            id: Uuid::new_v4(),
            name: "Breakfast".to_owned(),
            scheduled_for: Some(Utc::now()),
            menu_url: None,
        };

        let meal = row_to_meal(row).expect("valid row");
        assert!(meal.supports_tracking());
        assert_eq!(meal.name(), "Breakfast");
    }

    #[rstest]
    fn row_with_menu_url_converts_to_external_menu_meal() {
        let row = MealRow {
            id: Uuid::new_v4(),
            name: "Dinner out".to_owned(),
            scheduled_for: None,
            menu_url: Some("https://restaurant.example/menu".to_owned()),
        };

        let meal = row_to_meal(row).expect("valid row");
        assert!(!meal.supports_tracking());
        assert_eq!(
            meal.menu_url().map(Url::as_str),
            Some("https://restaurant.example/menu")
        );
    }

    #[rstest]
    fn row_with_malformed_menu_url_is_rejected() {
        let row = MealRow {
            id: Uuid::new_v4(),
            name: "Dinner out".to_owned(),
            scheduled_for: None,
            menu_url: Some("not a url".to_owned()),
        };

        let message = row_to_meal(row).expect_err("malformed url must fail");
        assert!(message.contains("invalid menu url"));
    }
}
