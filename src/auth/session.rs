use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use crate::error::AppError;

/// Name of the encrypted admin session cookie.
pub const SESSION_COOKIE: &str = "folio_session";

/// Contents of the admin session cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Copy of the configured auth secret at login time.
    pub secret: String,
}

/// Derive the cookie encryption key from configured key material.
///
/// SHA-512 yields exactly the 64 bytes `Key::from` needs, so short
/// configured values are fine.
pub fn cookie_key(material: &str) -> Key {
    let digest = Sha512::digest(material.as_bytes());
    Key::from(digest.as_slice())
}

/// Build the session cookie for a freshly logged-in superuser.
pub fn session_cookie(session: &AdminSession) -> Result<Cookie<'static>, AppError> {
    let value = serde_json::to_string(session)
        .map_err(|e| AppError::Internal(format!("Failed to serialize session: {}", e)))?;

    Ok(Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build())
}

/// Cookie used to clear the session on logout.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").removal().build()
}

/// Read the admin session from the jar.
///
/// A cookie that fails decryption is dropped by the jar and reads as absent.
pub fn read_session(jar: &PrivateCookieJar) -> Result<AdminSession, AppError> {
    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| AppError::Auth("Not logged in".into()))?;

    serde_json::from_str(cookie.value())
        .map_err(|e| AppError::Auth(format!("Invalid session: {}", e)))
}

/// Check that a session carries the configured secret.
///
/// An empty configured secret authorizes nobody.
pub fn authorize(session: &AdminSession, expected_secret: &str) -> Result<(), AppError> {
    if expected_secret.is_empty() {
        return Err(AppError::Auth("Admin access is disabled".into()));
    }
    if session.secret == expected_secret {
        Ok(())
    } else {
        Err(AppError::Auth("Unauthorized".into()))
    }
}

/// True when the request carries a valid superuser session.
pub fn is_superuser(jar: &PrivateCookieJar, expected_secret: &str) -> bool {
    read_session(jar)
        .and_then(|session| authorize(&session, expected_secret))
        .is_ok()
}
