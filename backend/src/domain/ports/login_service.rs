//! Driving port for login use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! knowing the backing infrastructure, so handler tests can substitute a
//! deterministic test double.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::user::{DisplayName, User, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Fixture id used by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// In-memory authenticator for handler tests: `anna` / `cabintrip`
/// authenticates successfully and produces a fixed user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.username() != "anna" || credentials.password() != "cabintrip" {
            return Err(Error::unauthorized("invalid credentials"));
        }

        let id = UserId::new(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        let display_name = DisplayName::new("anna")
            .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
        Ok(User::new(id, display_name))
    }
}
