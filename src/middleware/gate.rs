// SPDX-License-Identifier: MIT

//! Session gate: the coarse, presence-only access check applied before
//! any route handler runs.
//!
//! The gate classifies the request path and decides continue-vs-redirect
//! from whether a session cookie is present at all. It never decodes the
//! token; a forged or expired token passes here and is rejected by the
//! per-page verification in `routes::pages`. Both layers are intentional.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Public landing page (login/register live here).
pub const HOME_PATH: &str = "/";
/// Landing page for authenticated users.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Access class of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Home, login and register: for unauthenticated visitors.
    PublicAuth,
    /// Dashboard and admin pages: require a session.
    Protected,
    /// Everything else passes through unchanged.
    Open,
}

/// Classify a request path by prefix.
pub fn classify(path: &str) -> RouteClass {
    match path {
        "/" | "/login" | "/register" => RouteClass::PublicAuth,
        p if p.starts_with("/dashboard") || p.starts_with("/admin") => RouteClass::Protected,
        _ => RouteClass::Open,
    }
}

/// Outcome of the gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(&'static str),
}

/// Decide continue-vs-redirect from the path class and token presence.
///
/// Authenticated visitors are kept out of the auth pages; visitors
/// without a session cookie are kept out of the protected pages.
pub fn decide(path: &str, token_present: bool) -> GateDecision {
    match classify(path) {
        RouteClass::PublicAuth if token_present => GateDecision::Redirect(DASHBOARD_PATH),
        RouteClass::Protected if !token_present => GateDecision::Redirect(HOME_PATH),
        _ => GateDecision::Continue,
    }
}

/// Middleware applying the gate decision to every inbound request.
pub async fn session_gate(jar: CookieJar, request: Request, next: Next) -> Response {
    let token_present = jar.get(SESSION_COOKIE).is_some();

    match decide(request.uri().path(), token_present) {
        GateDecision::Continue => next.run(request).await,
        GateDecision::Redirect(target) => Redirect::temporary(target).into_response(),
    }
}
