//! HTTP inbound adapter exposing REST endpoints.

pub mod arrivals;
pub mod auth;
pub mod error;
pub mod health;
pub mod linens;
pub mod meals;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
