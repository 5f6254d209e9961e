//! Password gate evaluated before any page handler.
//!
//! Flow Overview:
//! - `/login` (exact) and anything under `/api/` pass through untouched.
//! - Every other path needs a `session-pw` cookie equal to the project password.
//! - Anything else, including a missing cookie or an unconfigured password, is
//!   answered with a redirect to `/login`.
//!
//! The decision is a pure function of the path, the cookie and the configured
//! secret; [`require_session`] only interprets it.

use axum::{
    body::Body,
    extract::Extension,
    http::{
        header::{COOKIE, LOCATION},
        HeaderMap, HeaderValue, Request, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Cookie holding the password the login page stored.
pub const SESSION_COOKIE_NAME: &str = "session-pw";
/// Redirect target for unauthenticated requests; also exempt from the gate.
pub const LOGIN_PATH: &str = "/login";
/// Prefix of routes exempt from the gate; API handlers authenticate themselves.
pub const API_PREFIX: &str = "/api/";

/// Outcome of one gate evaluation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Hand the request to the next stage unmodified.
    Continue,
    /// Stop here and redirect the client to the given path.
    Redirect(&'static str),
}

/// Returns true for paths that bypass the cookie check entirely.
#[must_use]
pub fn is_exempt(path: &str) -> bool {
    path == LOGIN_PATH || path.starts_with(API_PREFIX)
}

/// Decide what to do with a request.
///
/// `secret` is `None` when no project password is configured, in which case no
/// cookie can ever match.
#[must_use]
pub fn evaluate(path: &str, session_cookie: Option<&str>, secret: Option<&str>) -> Decision {
    if is_exempt(path) {
        return Decision::Continue;
    }

    match (session_cookie, secret) {
        (Some(cookie), Some(secret)) if cookie == secret => Decision::Continue,
        _ => Decision::Redirect(LOGIN_PATH),
    }
}

/// Find the `session-pw` value across all `Cookie` headers.
///
/// Headers are scanned as bytes so a non-UTF-8 sibling cookie cannot hide the
/// session cookie. Only the separator whitespace before a pair name is skipped;
/// the name must match exactly and the value is returned verbatim. A
/// `session-pw` value that is not valid UTF-8 is skipped.
#[must_use]
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .flat_map(|header| header.as_bytes().split(|&byte| byte == b';'))
        .find_map(|pair| {
            let start = pair.iter().position(|byte| !byte.is_ascii_whitespace())?;
            let pair = &pair[start..];
            let eq = pair.iter().position(|&byte| byte == b'=')?;
            if pair[..eq] != *SESSION_COOKIE_NAME.as_bytes() {
                return None;
            }
            std::str::from_utf8(&pair[eq + 1..]).ok()
        })
}

/// The configured project password, fixed for the process lifetime.
#[derive(Clone, Debug, Default)]
pub struct Gate {
    secret: Option<SecretString>,
}

impl Gate {
    /// Build a gate from the configured password.
    ///
    /// An empty password is treated the same as a missing one: the gate stays
    /// closed for every non-exempt path.
    #[must_use]
    pub fn new(secret: Option<SecretString>) -> Self {
        Self {
            secret: secret.filter(|secret| !secret.expose_secret().is_empty()),
        }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Evaluate the gate for a request without consuming it.
    #[must_use]
    pub fn check<B>(&self, request: &Request<B>) -> Decision {
        evaluate(
            request.uri().path(),
            session_cookie(request.headers()),
            self.secret.as_ref().map(|secret| secret.expose_secret()),
        )
    }
}

/// axum middleware enforcing the gate. Requires an `Extension<Arc<Gate>>`.
pub async fn require_session(
    Extension(gate): Extension<Arc<Gate>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match gate.check(&request) {
        Decision::Continue => next.run(request).await,
        Decision::Redirect(target) => redirect(target),
    }
}

fn redirect(target: &'static str) -> Response {
    (
        StatusCode::FOUND,
        [(LOCATION, HeaderValue::from_static(target))],
    )
        .into_response()
}
