//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ArrivalBoard, LinenSignup, LoginService, MealPlanning};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential authentication.
    pub login: Arc<dyn LoginService>,
    /// Meal catalog, ingredient ledgers, and the shopping list.
    pub meal_planning: Arc<dyn MealPlanning>,
    /// Bed-linen reservations.
    pub linens: Arc<dyn LinenSignup>,
    /// Arrival declarations.
    pub arrivals: Arc<dyn ArrivalBoard>,
}

impl HttpState {
    /// Bundle fixture implementations of every port, for handler tests and
    /// running without a database.
    ///
    /// # Examples
    /// ```
    /// use cabin_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixtures();
    /// let _login = state.login.clone();
    /// ```
    #[must_use]
    pub fn fixtures() -> Self {
        use crate::domain::ports::{
            FixtureArrivalBoard, FixtureLinenSignup, FixtureLoginService, FixtureMealPlanning,
        };
        Self {
            login: Arc::new(FixtureLoginService),
            meal_planning: Arc::new(FixtureMealPlanning),
            linens: Arc::new(FixtureLinenSignup),
            arrivals: Arc::new(FixtureArrivalBoard),
        }
    }
}
