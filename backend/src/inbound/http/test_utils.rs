//! Shared fixtures for handler tests.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

/// Cookie-session middleware for in-process handler tests: a throwaway
/// signing key, the production cookie name, and `Secure` switched off so
/// plain-HTTP test requests still carry the cookie back.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}
