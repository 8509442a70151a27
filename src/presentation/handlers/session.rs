use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::domain::SessionId;

pub const SESSION_COOKIE: &str = "session_id";

/// Reads the session cookie, minting a new session when it is absent or blank.
/// The returned jar always carries the cookie so the browser keeps it.
pub fn resolve_session(jar: CookieJar) -> (SessionId, CookieJar) {
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()))
        .unwrap_or_default();

    let cookie = Cookie::build((SESSION_COOKIE, session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (session, jar.add(cookie))
}
