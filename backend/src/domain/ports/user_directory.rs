//! Driven port for user identity lookups.
//!
//! The directory resolves login usernames to identities and batches
//! id-to-display-name lookups so attribution costs one query per view, not
//! one per row.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::auth::PasswordDigest;
use crate::domain::user::{DisplayName, User, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
    }
}

/// Port for resolving user identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a user and their stored password digest by username.
    /// Returns `None` for unknown usernames; the caller must not reveal
    /// whether the username or the password was wrong.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordDigest)>, UserDirectoryError>;

    /// Batched display-name lookup. Ids absent from the result are unknown
    /// to the directory; callers substitute a placeholder.
    async fn display_names(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, DisplayName>, UserDirectoryError>;
}
