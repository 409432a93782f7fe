//! Login service backed by the user directory.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::meal_planning_service::map_directory_error;
use crate::domain::ports::{LoginService, UserDirectory};
use crate::domain::user::User;

/// Authenticates credentials against the user directory.
///
/// Unknown usernames and wrong passwords produce the same error so the
/// response never reveals which half of the credentials failed.
#[derive(Clone)]
pub struct DirectoryLoginService<D> {
    directory: Arc<D>,
}

impl<D> DirectoryLoginService<D> {
    /// Create a new service over the given directory.
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D> LoginService for DirectoryLoginService<D>
where
    D: UserDirectory,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let found = self
            .directory
            .find_by_username(credentials.username())
            .await
            .map_err(map_directory_error)?;

        let Some((user, digest)) = found else {
            debug!(username = credentials.username(), "login for unknown username");
            return Err(Error::unauthorized("invalid username or password"));
        };

        if !digest.matches(credentials.password()) {
            return Err(Error::unauthorized("invalid username or password"));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::auth::PasswordDigest;
    use crate::domain::ports::MockUserDirectory;
    use crate::domain::user::{DisplayName, UserId};

    fn anna() -> (User, PasswordDigest) {
        let user = User::new(
            UserId::random(),
            DisplayName::new("Anna").expect("valid name"),
        );
        (user, PasswordDigest::from_password("cabintrip"))
    }

    #[tokio::test]
    async fn valid_credentials_authenticate() {
        let (user, digest) = anna();
        let expected_id = *user.id();

        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_username()
            .withf(|username| username == "anna")
            .times(1)
            .return_once(move |_| Ok(Some((user, digest))));

        let service = DirectoryLoginService::new(Arc::new(directory));
        let creds = LoginCredentials::try_from_parts("anna", "cabintrip").expect("credentials");
        let authenticated = service.authenticate(&creds).await.expect("login succeeds");

        assert_eq!(*authenticated.id(), expected_id);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let (user, digest) = anna();

        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_username()
            .times(1)
            .return_once(move |_| Ok(Some((user, digest))));

        let service = DirectoryLoginService::new(Arc::new(directory));
        let creds = LoginCredentials::try_from_parts("anna", "cabintrap").expect("credentials");
        let error = service.authenticate(&creds).await.expect_err("rejected");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "invalid username or password");
    }

    #[tokio::test]
    async fn unknown_username_gets_the_same_message_as_wrong_password() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));

        let service = DirectoryLoginService::new(Arc::new(directory));
        let creds = LoginCredentials::try_from_parts("nobody", "whatever").expect("credentials");
        let error = service.authenticate(&creds).await.expect_err("rejected");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "invalid username or password");
    }
}
