//! Meal planning domain service.
//!
//! Implements the [`MealPlanning`] driving port over the meal, ingredient,
//! and user-directory driven ports: per-meal ingredient lists with batched
//! contributor attribution, duplicate-suppressed adds, owner-only removal,
//! and the re-derived trip-wide shopping list.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::error::Error;
use crate::domain::ingredient::{Ingredient, IngredientId, IngredientName, NewIngredient};
use crate::domain::meal::{Meal, MealId};
use crate::domain::ports::{
    AttributedIngredient, IngredientRepository, IngredientRepositoryError, MealOverview,
    MealPlanning, MealRepository, MealRepositoryError, UserDirectory, UserDirectoryError,
};
use crate::domain::shopping_list::{ShoppingListEntry, build_shopping_list};
use crate::domain::user::{DisplayName, UserId};

/// Meal planning service wiring the grocery-list ledgers together.
#[derive(Clone)]
pub struct MealPlanningService<M, I, U> {
    meals: Arc<M>,
    ingredients: Arc<I>,
    users: Arc<U>,
}

impl<M, I, U> MealPlanningService<M, I, U> {
    /// Create a new service with the given repositories.
    pub const fn new(meals: Arc<M>, ingredients: Arc<I>, users: Arc<U>) -> Self {
        Self {
            meals,
            ingredients,
            users,
        }
    }
}

pub(crate) fn map_meal_error(error: MealRepositoryError) -> Error {
    match error {
        MealRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("meal catalog unavailable: {message}"))
        }
        MealRepositoryError::Query { message } => {
            Error::internal(format!("meal catalog error: {message}"))
        }
    }
}

pub(crate) fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

fn duplicate_item_error(name: &IngredientName, meal: &Meal) -> Error {
    Error::duplicate_item(format!(
        "\"{}\" is already on the list for {}",
        name.as_str(),
        meal.name()
    ))
    .with_details(json!({
        "name": name.as_str(),
        "meal": meal.name(),
        "code": "duplicate_ingredient",
    }))
}

impl<M, I, U> MealPlanningService<M, I, U>
where
    M: MealRepository,
    I: IngredientRepository,
    U: UserDirectory,
{
    fn map_ingredient_error(meal: &Meal, error: IngredientRepositoryError) -> Error {
        match error {
            IngredientRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("ingredient ledger unavailable: {message}"))
            }
            IngredientRepositoryError::Query { message } => {
                Error::internal(format!("ingredient ledger error: {message}"))
            }
            // Store-level uniqueness caught a racing insert after our probe
            // passed; surface it exactly like the probe would have.
            IngredientRepositoryError::DuplicateName { name } => {
                match IngredientName::new(name.as_str()) {
                    Ok(name) => duplicate_item_error(&name, meal),
                    Err(_) => Error::duplicate_item(format!(
                        "\"{name}\" is already on the list for {}",
                        meal.name()
                    )),
                }
            }
        }
    }

    fn map_plain_ingredient_error(error: IngredientRepositoryError) -> Error {
        match error {
            IngredientRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("ingredient ledger unavailable: {message}"))
            }
            IngredientRepositoryError::Query { message }
            | IngredientRepositoryError::DuplicateName { name: message } => {
                Error::internal(format!("ingredient ledger error: {message}"))
            }
        }
    }

    async fn require_meal(&self, meal_id: MealId) -> Result<Meal, Error> {
        self.meals
            .find_by_id(meal_id)
            .await
            .map_err(map_meal_error)?
            .ok_or_else(|| Error::not_found(format!("no meal with id {meal_id}")))
    }

    /// Collect unique contributor ids, fetch their names once, and map back.
    async fn attribute(
        &self,
        ingredients: Vec<Ingredient>,
    ) -> Result<Vec<AttributedIngredient>, Error> {
        let unique_ids: Vec<UserId> = ingredients
            .iter()
            .map(|ingredient| ingredient.contributed_by)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let names = self
            .users
            .display_names(&unique_ids)
            .await
            .map_err(map_directory_error)?;

        Ok(ingredients
            .into_iter()
            .map(|ingredient| {
                let contributor_name = names
                    .get(&ingredient.contributed_by)
                    .cloned()
                    .unwrap_or_else(DisplayName::unknown);
                AttributedIngredient {
                    ingredient,
                    contributor_name,
                }
            })
            .collect())
    }
}

#[async_trait]
impl<M, I, U> MealPlanning for MealPlanningService<M, I, U>
where
    M: MealRepository,
    I: IngredientRepository,
    U: UserDirectory,
{
    async fn list_meals(&self) -> Result<Vec<MealOverview>, Error> {
        let meals = self.meals.list().await.map_err(map_meal_error)?;

        let mut overviews = Vec::with_capacity(meals.len());
        for meal in meals {
            let ingredient_count = if meal.supports_tracking() {
                let count = self
                    .ingredients
                    .count_for_meal(meal.id())
                    .await
                    .map_err(Self::map_plain_ingredient_error)?;
                Some(count)
            } else {
                None
            };
            overviews.push(MealOverview {
                meal,
                ingredient_count,
            });
        }
        Ok(overviews)
    }

    async fn ingredients_for_meal(
        &self,
        meal_id: MealId,
    ) -> Result<Vec<AttributedIngredient>, Error> {
        let meal = self.require_meal(meal_id).await?;
        if !meal.supports_tracking() {
            // External-menu meals have no ledger; an empty list, not an error.
            return Ok(Vec::new());
        }

        let rows = self
            .ingredients
            .list_for_meal(meal_id)
            .await
            .map_err(Self::map_plain_ingredient_error)?;
        self.attribute(rows).await
    }

    async fn add_ingredient(
        &self,
        meal_id: MealId,
        name: IngredientName,
        contributor: UserId,
    ) -> Result<AttributedIngredient, Error> {
        let meal = self.require_meal(meal_id).await?;
        if !meal.supports_tracking() {
            return Err(Error::unsupported_operation(format!(
                "{} uses an external menu; its ingredients are not tracked here",
                meal.name()
            ))
            .with_details(json!({
                "meal": meal.name(),
                "code": "external_menu_meal",
            })));
        }

        // Check-then-insert: a concurrent duplicate can slip past this probe,
        // in which case the store's uniqueness constraint rejects the insert.
        let existing = self
            .ingredients
            .find_by_normalized_name(meal_id, &name.normalized())
            .await
            .map_err(Self::map_plain_ingredient_error)?;
        if let Some(conflict) = existing {
            return Err(duplicate_item_error(&conflict.name, &meal));
        }

        let row = self
            .ingredients
            .insert(NewIngredient {
                name,
                meal_id,
                contributed_by: contributor,
            })
            .await
            .map_err(|error| Self::map_ingredient_error(&meal, error))?;

        let mut attributed = self.attribute(vec![row]).await?;
        attributed
            .pop()
            .ok_or_else(|| Error::internal("inserted ingredient missing from attribution"))
    }

    async fn remove_ingredient(&self, id: IngredientId, requester: UserId) -> Result<(), Error> {
        let ingredient = self
            .ingredients
            .find_by_id(id)
            .await
            .map_err(Self::map_plain_ingredient_error)?
            .ok_or_else(|| Error::not_found(format!("no ingredient with id {id}")))?;

        if ingredient.contributed_by != requester {
            return Err(Error::forbidden(
                "only the contributor may remove an ingredient",
            ));
        }

        self.ingredients
            .delete(id)
            .await
            .map_err(Self::map_plain_ingredient_error)
    }

    async fn shopping_list(&self) -> Result<Vec<ShoppingListEntry>, Error> {
        let meals = self.meals.list().await.map_err(map_meal_error)?;
        let trackable_ids: Vec<MealId> = meals
            .iter()
            .filter(|meal| meal.supports_tracking())
            .map(Meal::id)
            .collect();

        if trackable_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ingredients = self
            .ingredients
            .list_for_meals(&trackable_ids)
            .await
            .map_err(Self::map_plain_ingredient_error)?;

        Ok(build_shopping_list(&meals, &ingredients))
    }
}

#[cfg(test)]
#[path = "meal_planning_service_tests.rs"]
mod tests;
