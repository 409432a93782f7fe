//! Driving port for meal and ingredient coordination use-cases.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::error::Error;
use crate::domain::ingredient::{Ingredient, IngredientId, IngredientName};
use crate::domain::meal::{Meal, MealId};
use crate::domain::shopping_list::ShoppingListEntry;
use crate::domain::user::{DisplayName, UserId};

/// A meal with its summary-line ingredient count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealOverview {
    /// The catalog entry.
    pub meal: Meal,
    /// Number of tracked ingredients; `None` for external-menu meals.
    pub ingredient_count: Option<u64>,
}

/// An ingredient row resolved to its contributor's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedIngredient {
    /// The ledger row.
    pub ingredient: Ingredient,
    /// Display name of the contributing user, or a placeholder when the
    /// contributor id can no longer be resolved.
    pub contributor_name: DisplayName,
}

/// Domain use-case port for the collaborative grocery lists.
#[async_trait]
pub trait MealPlanning: Send + Sync {
    /// The meal catalog with per-meal ingredient counts.
    async fn list_meals(&self) -> Result<Vec<MealOverview>, Error>;

    /// Ingredients of one meal with contributor attribution.
    async fn ingredients_for_meal(
        &self,
        meal_id: MealId,
    ) -> Result<Vec<AttributedIngredient>, Error>;

    /// Add an ingredient to a meal's list on behalf of a user, returning the
    /// stored row with the contributor's display name resolved.
    async fn add_ingredient(
        &self,
        meal_id: MealId,
        name: IngredientName,
        contributor: UserId,
    ) -> Result<AttributedIngredient, Error>;

    /// Remove an ingredient; only its contributor may do so.
    async fn remove_ingredient(&self, id: IngredientId, requester: UserId) -> Result<(), Error>;

    /// The trip-wide deduplicated shopping list, re-derived on every call.
    async fn shopping_list(&self) -> Result<Vec<ShoppingListEntry>, Error>;
}

/// Fixture meal id used by [`FixtureMealPlanning`].
pub const FIXTURE_MEAL_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Canned meal-planning implementation for handler tests: one tracked
/// "Breakfast" meal holding a single "Bread" ingredient contributed by the
/// fixture user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMealPlanning;

impl FixtureMealPlanning {
    fn meal() -> Result<Meal, Error> {
        let id = MealId::new(FIXTURE_MEAL_ID)
            .map_err(|err| Error::internal(format!("invalid fixture meal id: {err}")))?;
        Meal::tracked(id, "Breakfast", None)
            .map_err(|err| Error::internal(format!("invalid fixture meal: {err}")))
    }

    fn bread(meal: &Meal) -> Result<Ingredient, Error> {
        let name = IngredientName::new("Bread")
            .map_err(|err| Error::internal(format!("invalid fixture ingredient: {err}")))?;
        let contributor = UserId::new(super::login_service::FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        Ok(Ingredient {
            id: IngredientId::new("b5c2a1d4-3e6f-4a7b-8c9d-0e1f2a3b4c5d")
                .map_err(|err| Error::internal(format!("invalid fixture id: {err}")))?,
            name,
            meal_id: meal.id(),
            contributed_by: contributor,
            created_at: Utc::now(),
        })
    }
}

#[async_trait]
impl MealPlanning for FixtureMealPlanning {
    async fn list_meals(&self) -> Result<Vec<MealOverview>, Error> {
        Ok(vec![MealOverview {
            meal: Self::meal()?,
            ingredient_count: Some(1),
        }])
    }

    async fn ingredients_for_meal(
        &self,
        meal_id: MealId,
    ) -> Result<Vec<AttributedIngredient>, Error> {
        let meal = Self::meal()?;
        if meal_id != meal.id() {
            return Err(Error::not_found("no such meal"));
        }
        let contributor_name = DisplayName::new("anna")
            .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
        Ok(vec![AttributedIngredient {
            ingredient: Self::bread(&meal)?,
            contributor_name,
        }])
    }

    async fn add_ingredient(
        &self,
        meal_id: MealId,
        name: IngredientName,
        contributor: UserId,
    ) -> Result<AttributedIngredient, Error> {
        let meal = Self::meal()?;
        if meal_id != meal.id() {
            return Err(Error::not_found("no such meal"));
        }
        let contributor_name = DisplayName::new("anna")
            .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
        Ok(AttributedIngredient {
            ingredient: Ingredient {
                id: IngredientId::random(),
                name,
                meal_id,
                contributed_by: contributor,
                created_at: Utc::now(),
            },
            contributor_name,
        })
    }

    async fn remove_ingredient(&self, _id: IngredientId, _requester: UserId) -> Result<(), Error> {
        Ok(())
    }

    async fn shopping_list(&self) -> Result<Vec<ShoppingListEntry>, Error> {
        let meal = Self::meal()?;
        let bread = Self::bread(&meal)?;
        Ok(crate::domain::shopping_list::build_shopping_list(
            &[meal],
            &[bread],
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_serves_one_breakfast_meal() {
        let overviews = FixtureMealPlanning.list_meals().await.expect("meals");
        assert_eq!(overviews.len(), 1);
        assert_eq!(overviews[0].meal.name(), "Breakfast");
        assert_eq!(overviews[0].ingredient_count, Some(1));
    }

    #[tokio::test]
    async fn fixture_rejects_unknown_meal_ids() {
        let err = FixtureMealPlanning
            .ingredients_for_meal(MealId::random())
            .await
            .expect_err("unknown meal");
        assert_eq!(err.code(), crate::domain::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn fixture_shopping_list_contains_bread() {
        let list = FixtureMealPlanning.shopping_list().await.expect("list");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Bread");
    }
}
