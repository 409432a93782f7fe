//! Trip-wide aggregated shopping list.
//!
//! The aggregation is a pure projection over the current meal catalog and
//! ingredient rows: grouped by case-insensitive name, display casing taken
//! from the first-seen row, each entry crediting every meal that needs the
//! item. It is recomputed from fresh reads on every request, never patched
//! incrementally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ingredient::Ingredient;
use super::meal::{Meal, MealRef};

/// One line on the aggregated shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntry {
    /// Display name in first-seen original casing.
    pub name: String,
    /// Every meal whose list contains this item, in first-seen order.
    pub needed_by: Vec<MealRef>,
}

/// Fold the current ingredient rows into the deduplicated shopping list.
///
/// Ingredients whose meal is not in `meals` (or whose meal delegates to an
/// external menu) are skipped. Entries come back sorted by name using
/// case-insensitive lexicographic order; within an entry, contributing
/// meals are deduplicated and keep first-seen order.
#[must_use]
pub fn build_shopping_list(meals: &[Meal], ingredients: &[Ingredient]) -> Vec<ShoppingListEntry> {
    let trackable: BTreeMap<_, _> = meals
        .iter()
        .filter(|meal| meal.supports_tracking())
        .map(|meal| (meal.id().as_uuid().to_owned(), meal))
        .collect();

    // Keyed by normalized name, so the map order is already the
    // case-insensitive lexicographic output order.
    let mut grouped: BTreeMap<String, ShoppingListEntry> = BTreeMap::new();
    for ingredient in ingredients {
        let Some(meal) = trackable.get(ingredient.meal_id.as_uuid()) else {
            continue;
        };
        let entry = grouped
            .entry(ingredient.name.normalized())
            .or_insert_with(|| ShoppingListEntry {
                name: ingredient.name.as_str().to_owned(),
                needed_by: Vec::new(),
            });
        if !entry.needed_by.iter().any(|m| m.id == meal.id()) {
            entry.needed_by.push(MealRef::from(*meal));
        }
    }

    grouped.into_values().collect()
}
