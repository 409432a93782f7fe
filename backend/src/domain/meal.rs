//! Meal catalog entries.
//!
//! A meal either tracks its own ingredient list or delegates to an external
//! menu. The capability is part of the type, never inferred from optional
//! field presence: [`Meal::supports_tracking`] is derived from the variant.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Validation errors returned by the meal constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealValidationError {
    /// Supplied id was not a valid UUID.
    InvalidId,
    /// Meal name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for MealValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "meal id must be a valid UUID"),
            Self::EmptyName => write!(f, "meal name must not be empty"),
        }
    }
}

impl std::error::Error for MealValidationError {}

/// Stable meal identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealId(Uuid);

impl MealId {
    /// Validate and construct a [`MealId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, MealValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| MealValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`MealId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A planned eating occasion, immutable for the duration of a trip.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - A meal is either tracked or backed by an external menu; the two are
///   mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Meal {
    /// Ingredients for this meal are tracked in the shared ledger.
    Tracked {
        /// Catalog identifier.
        id: MealId,
        /// Meal name shown in every list.
        name: String,
        /// Scheduled time of day, when the trip plan fixes one.
        scheduled_for: Option<DateTime<Utc>>,
    },
    /// The meal delegates to an external menu; no ingredients are tracked.
    ExternalMenu {
        /// Catalog identifier.
        id: MealId,
        /// Meal name shown in every list.
        name: String,
        /// Scheduled time of day, when the trip plan fixes one.
        scheduled_for: Option<DateTime<Utc>>,
        /// Link to the external menu.
        menu_url: Url,
    },
}

impl Meal {
    /// Construct a meal that tracks its own ingredient list.
    pub fn tracked(
        id: MealId,
        name: impl Into<String>,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Result<Self, MealValidationError> {
        let name = validated_name(name)?;
        Ok(Self::Tracked {
            id,
            name,
            scheduled_for,
        })
    }

    /// Construct a meal backed by an external menu.
    pub fn external_menu(
        id: MealId,
        name: impl Into<String>,
        scheduled_for: Option<DateTime<Utc>>,
        menu_url: Url,
    ) -> Result<Self, MealValidationError> {
        let name = validated_name(name)?;
        Ok(Self::ExternalMenu {
            id,
            name,
            scheduled_for,
            menu_url,
        })
    }

    /// Catalog identifier.
    #[must_use]
    pub const fn id(&self) -> MealId {
        match self {
            Self::Tracked { id, .. } | Self::ExternalMenu { id, .. } => *id,
        }
    }

    /// Meal name shown in every list.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tracked { name, .. } | Self::ExternalMenu { name, .. } => name.as_str(),
        }
    }

    /// Scheduled time of day, when the trip plan fixes one.
    #[must_use]
    pub const fn scheduled_for(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Tracked { scheduled_for, .. } | Self::ExternalMenu { scheduled_for, .. } => {
                *scheduled_for
            }
        }
    }

    /// External menu link, if the meal delegates to one.
    #[must_use]
    pub const fn menu_url(&self) -> Option<&Url> {
        match self {
            Self::Tracked { .. } => None,
            Self::ExternalMenu { menu_url, .. } => Some(menu_url),
        }
    }

    /// Whether ingredients for this meal are tracked in the shared ledger.
    #[must_use]
    pub const fn supports_tracking(&self) -> bool {
        matches!(self, Self::Tracked { .. })
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, MealValidationError> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(MealValidationError::EmptyName);
    }
    Ok(name)
}

/// Lightweight `(id, name)` reference to a meal, used by derived views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MealRef {
    /// Catalog identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: MealId,
    /// Meal name at derivation time.
    pub name: String,
}

impl From<&Meal> for MealRef {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id(),
            name: meal.name().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn menu_url() -> Url {
        Url::parse("https://restaurant.example/menu").expect("valid url")
    }

    #[test]
    fn tracked_meal_supports_tracking() {
        let meal = Meal::tracked(MealId::random(), "Breakfast", None).expect("valid meal");
        assert!(meal.supports_tracking());
        assert!(meal.menu_url().is_none());
    }

    #[test]
    fn external_menu_meal_does_not_support_tracking() {
        let meal = Meal::external_menu(MealId::random(), "Dinner out", None, menu_url())
            .expect("valid meal");
        assert!(!meal.supports_tracking());
        assert_eq!(
            meal.menu_url().map(Url::as_str),
            Some("https://restaurant.example/menu")
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_meal_names(#[case] raw: &str) {
        assert_eq!(
            Meal::tracked(MealId::random(), raw, None),
            Err(MealValidationError::EmptyName)
        );
    }

    #[test]
    fn meal_ref_captures_id_and_name() {
        let meal = Meal::tracked(MealId::random(), "Taco Night", None).expect("valid meal");
        let meal_ref = MealRef::from(&meal);
        assert_eq!(meal_ref.id, meal.id());
        assert_eq!(meal_ref.name, "Taco Night");
    }
}
