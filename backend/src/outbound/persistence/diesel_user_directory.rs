//! PostgreSQL-backed [`UserDirectory`] implementation using Diesel.
//!
//! Display-name attribution runs as one `eq_any` query per view, never one
//! query per row.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::auth::PasswordDigest;
use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::user::{DisplayName, User, UserId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserDirectory`] port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to user directory errors.
fn map_pool_error(error: PoolError) -> UserDirectoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserDirectoryError::connection(message)
        }
    }
}

/// Map Diesel errors to user directory errors.
fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => UserDirectoryError::connection("database connection error"),
        // The directory is read-only here; a unique violation cannot occur
        // on these paths and falls through as a query failure.
        DieselFailure::UniqueViolation { message } => UserDirectoryError::query(message),
        DieselFailure::Query { message } => UserDirectoryError::query(message),
    }
}

/// Convert a database row to a domain [`User`] plus stored digest.
fn row_to_user(row: UserRow) -> Result<(User, PasswordDigest), String> {
    let display_name = DisplayName::new(row.display_name)
        .map_err(|err| format!("user {} failed validation: {err}", row.id))?;
    let user = User::new(UserId::from_uuid(row.id), display_name);
    Ok((user, PasswordDigest::from_hex(row.password_digest)))
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordDigest)>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user)
            .transpose()
            .map_err(UserDirectoryError::query)
    }

    async fn display_names(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, DisplayName>, UserDirectoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let raw_ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<(Uuid, String)> = users::table
            .filter(users::id.eq_any(raw_ids))
            .select((users::id, users::display_name))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut names = HashMap::with_capacity(rows.len());
        for (id, display_name) in rows {
            let display_name = DisplayName::new(display_name)
                .map_err(|err| UserDirectoryError::query(format!("user {id}: {err}")))?;
            names.insert(UserId::from_uuid(id), display_name);
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, UserDirectoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(err, UserDirectoryError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_converts_to_user_and_digest() {
        let digest = PasswordDigest::from_password("cabintrip");
        let row = UserRow {
            id: Uuid::new_v4(),
            display_name: "Anna".to_owned(),
            password_digest: digest.as_hex().to_owned(),
        };

        let (user, stored) = row_to_user(row).expect("valid row");
        assert_eq!(user.display_name().as_ref(), "Anna");
        assert!(stored.matches("cabintrip"));
    }

    #[rstest]
    fn blank_stored_display_name_is_rejected() {
        let row = UserRow {
            id: Uuid::new_v4(),
            display_name: "  ".to_owned(),
            password_digest: "deadbeef".to_owned(),
        };

        let message = row_to_user(row).expect_err("blank display name must fail");
        assert!(message.contains("failed validation"));
    }
}
