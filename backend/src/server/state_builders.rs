//! Builders wiring persistence adapters into the domain services.

use std::sync::Arc;

use actix_web::web;

use crate::domain::{
    ArrivalBoardService, DirectoryLoginService, LinenSignupService, MealPlanningService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselArrivalRepository, DieselIngredientRepository,
    DieselLinenReservationRepository, DieselMealRepository, DieselUserDirectory,
};

use super::ServerConfig;

/// Wire the Diesel adapters into the domain services over one shared pool.
fn build_database_state(pool: &DbPool) -> HttpState {
    let directory = Arc::new(DieselUserDirectory::new(pool.clone()));

    HttpState {
        login: Arc::new(DirectoryLoginService::new(directory.clone())),
        meal_planning: Arc::new(MealPlanningService::new(
            Arc::new(DieselMealRepository::new(pool.clone())),
            Arc::new(DieselIngredientRepository::new(pool.clone())),
            directory.clone(),
        )),
        linens: Arc::new(LinenSignupService::new(
            Arc::new(DieselLinenReservationRepository::new(pool.clone())),
            directory.clone(),
        )),
        arrivals: Arc::new(ArrivalBoardService::new(
            Arc::new(DieselArrivalRepository::new(pool.clone())),
            directory,
        )),
    }
}

/// Build the shared HTTP state: database-backed services when a pool is
/// configured, fixture implementations otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_database_state(pool),
        None => HttpState::fixtures(),
    };
    web::Data::new(state)
}
