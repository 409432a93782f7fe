//! Cookie-session access for HTTP handlers.
//!
//! Handlers never touch `actix_session::Session` directly. [`SessionContext`]
//! narrows it to the three operations the surface needs: persisting the user
//! id at login, reading it back on authenticated requests, and purging the
//! cookie at logout. A cookie that fails to parse back into a [`UserId`] is
//! treated as logged out rather than as a server fault.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// The caller's session, scoped to the operations the handlers use.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the raw Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record the authenticated user in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The user id stored in the session, if any.
    ///
    /// Cookie contents the server cannot parse as an id count as no session;
    /// the mismatch is logged for operators but never surfaced to the caller.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let Some(raw) = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
        else {
            return Ok(None);
        };
        match UserId::new(&raw) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                tracing::warn!("invalid user id in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// The user id stored in the session, or `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Discard the session and invalidate the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
