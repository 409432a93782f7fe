//! Ingredient ledger entries.
//!
//! Each ingredient is a named grocery item contributed by a user to one
//! meal's list. Names keep their original casing for display; duplicate
//! checks and aggregation grouping use the normalized form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::meal::MealId;
use super::user::UserId;

/// Maximum accepted length for an ingredient name, matching the column width.
pub const INGREDIENT_NAME_MAX: usize = 120;

/// Validation errors returned by the ingredient constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientValidationError {
    /// Supplied id was not a valid UUID.
    InvalidId,
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Name exceeded the storage limit.
    NameTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
}

impl fmt::Display for IngredientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "ingredient id must be a valid UUID"),
            Self::EmptyName => write!(f, "ingredient name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "ingredient name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for IngredientValidationError {}

/// Stable ingredient identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(Uuid);

impl IngredientId {
    /// Validate and construct an [`IngredientId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, IngredientValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| IngredientValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`IngredientId`].
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

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty ingredient name preserving the contributor's casing.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace on construction.
/// - Non-empty and at most [`INGREDIENT_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IngredientName(String);

impl IngredientName {
    /// Validate and construct an [`IngredientName`], trimming the input.
    pub fn new(raw: impl Into<String>) -> Result<Self, IngredientValidationError> {
        let trimmed = raw.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(IngredientValidationError::EmptyName);
        }
        if trimmed.chars().count() > INGREDIENT_NAME_MAX {
            return Err(IngredientValidationError::NameTooLong {
                max: INGREDIENT_NAME_MAX,
            });
        }
        Ok(Self(trimmed))
    }

    /// Original-case form for display.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Lowercased form used for duplicate checks and aggregation grouping.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for IngredientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<IngredientName> for String {
    fn from(value: IngredientName) -> Self {
        value.0
    }
}

impl TryFrom<String> for IngredientName {
    type Error = IngredientValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A persisted ingredient row attributed to its contributor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    /// Ledger identifier, assigned by the store.
    pub id: IngredientId,
    /// Item name as entered by the contributor.
    pub name: IngredientName,
    /// Meal this ingredient belongs to.
    pub meal_id: MealId,
    /// User who added the item; only they may remove it.
    pub contributed_by: UserId,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Parameters for inserting a new ingredient; id and timestamp are assigned
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    /// Validated item name.
    pub name: IngredientName,
    /// Target meal.
    pub meal_id: MealId,
    /// Contributing user.
    pub contributed_by: UserId,
}
