//! Domain ports: the seams between the ledgers and the outside world.
//!
//! Driven ports (`*Repository`, [`UserDirectory`]) are implemented by
//! persistence adapters; driving ports ([`LoginService`], [`MealPlanning`],
//! [`LinenSignup`], [`ArrivalBoard`]) are implemented by domain services and
//! consumed by inbound adapters. Handler tests substitute the `Fixture*`
//! implementations.

mod arrival_board;
mod arrival_repository;
mod ingredient_repository;
mod linen_repository;
mod linen_signup;
mod login_service;
pub(crate) mod macros;
mod meal_planning;
mod meal_repository;
mod user_directory;

pub use self::arrival_board::{ArrivalBoard, ArrivalRosterEntry, FixtureArrivalBoard};
pub use self::arrival_repository::{ArrivalRepository, ArrivalRepositoryError};
pub use self::ingredient_repository::{IngredientRepository, IngredientRepositoryError};
pub use self::linen_repository::{LinenRepositoryError, LinenReservationRepository};
pub use self::linen_signup::{FixtureLinenSignup, LinenRoster, LinenRosterEntry, LinenSignup};
pub use self::login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
pub use self::meal_planning::{
    AttributedIngredient, FIXTURE_MEAL_ID, FixtureMealPlanning, MealOverview, MealPlanning,
};
pub use self::meal_repository::{MealRepository, MealRepositoryError};
pub use self::user_directory::{UserDirectory, UserDirectoryError};

#[cfg(test)]
pub use self::arrival_repository::MockArrivalRepository;
#[cfg(test)]
pub use self::ingredient_repository::MockIngredientRepository;
#[cfg(test)]
pub use self::linen_repository::MockLinenReservationRepository;
#[cfg(test)]
pub use self::meal_repository::MockMealRepository;
#[cfg(test)]
pub use self::user_directory::MockUserDirectory;
