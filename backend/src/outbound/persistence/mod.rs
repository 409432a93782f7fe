//! PostgreSQL persistence adapters for the domain's driven ports.
//!
//! # Design
//!
//! - **Thin adapters**: each repository translates between domain types and
//!   Diesel rows, nothing more. Business rules live in the domain services.
//! - **Internal models**: row structs in [`models`] never leak past this
//!   module.
//! - **Async-safe pooling**: all adapters share a [`DbPool`] built on
//!   `diesel-async` and `bb8`.
//! - **Strongly typed errors**: raw Diesel failures are classified once and
//!   translated into each port's error enum, so constraint violations
//!   surface as their domain-specific variants.

mod diesel_arrival_repository;
mod diesel_helpers;
mod diesel_ingredient_repository;
mod diesel_linen_repository;
mod diesel_meal_repository;
mod diesel_user_directory;
mod models;
mod pool;
mod schema;

pub use diesel_arrival_repository::DieselArrivalRepository;
pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use diesel_linen_repository::DieselLinenReservationRepository;
pub use diesel_meal_repository::DieselMealRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use pool::{DbPool, PoolConfig, PoolError};
