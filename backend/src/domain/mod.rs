//! Domain layer for the cabin trip coordination backend.
//!
//! Holds the transport-agnostic model of the trip's shared ledgers: the meal
//! catalog with its per-meal ingredient lists, the derived shopping list,
//! bed-linen reservations, arrival declarations, and login. Inbound adapters
//! drive the layer through the `ports` traits; persistence adapters implement
//! the driven ports.

pub mod arrival;
mod arrival_service;
pub mod auth;
mod directory_login;
pub mod error;
pub mod ingredient;
pub mod linen;
mod linen_service;
pub mod meal;
mod meal_planning_service;
pub mod ports;
pub mod shopping_list;
pub mod user;

pub use self::arrival::{
    ArrivalRecord, ArrivalValidationError, TransportMode, UpsertArrival,
};
pub use self::arrival_service::ArrivalBoardService;
pub use self::auth::{LoginCredentials, LoginValidationError, PasswordDigest};
pub use self::directory_login::DirectoryLoginService;
pub use self::error::{Error, ErrorCode};
pub use self::ingredient::{
    INGREDIENT_NAME_MAX, Ingredient, IngredientId, IngredientName, IngredientValidationError,
    NewIngredient,
};
pub use self::linen::{
    LINEN_RENT_MAX_SETS, LINEN_SET_PRICE_SEK, LinenChoice, LinenReservation, LinenSummary,
    LinenValidationError,
};
pub use self::linen_service::LinenSignupService;
pub use self::meal::{Meal, MealId, MealRef, MealValidationError};
pub use self::meal_planning_service::MealPlanningService;
pub use self::shopping_list::{ShoppingListEntry, build_shopping_list};
pub use self::user::{DISPLAY_NAME_MAX, DisplayName, User, UserId, UserValidationError};
