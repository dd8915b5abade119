// SPDX-License-Identifier: MIT

//! Page routes and the authoritative per-page session verification.
//!
//! The coarse gate only checks token presence; every protected page
//! re-verifies the token's signature and expiry here before touching the
//! store. Verification failure clears the client-held token so the next
//! request falls through the gate's "no token" branch instead of
//! retrying a known-bad token.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::middleware::auth::{removal_cookie, verify_session_token, Claims};
use crate::middleware::gate::{DASHBOARD_PATH, HOME_PATH, SESSION_COOKIE};
use crate::models::UserProfile;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(auth_page))
        .route("/login", get(auth_page))
        .route("/register", get(auth_page))
        .route("/dashboard", get(dashboard_page))
        .route("/admin", get(admin_page))
}

/// Payload for the public auth landing pages. The gate has already
/// redirected authenticated visitors to the dashboard.
#[derive(Serialize)]
struct AuthPageResponse {
    portal: &'static str,
    login: &'static str,
    register: &'static str,
}

async fn auth_page() -> Json<AuthPageResponse> {
    Json(AuthPageResponse {
        portal: "Patient Wellness Portal",
        login: "/api/auth/login",
        register: "/api/auth/register",
    })
}

/// Dashboard payload: the subject's own record.
#[derive(Serialize)]
struct DashboardResponse {
    user: UserProfile,
}

/// User-management payload for the admin page.
#[derive(Serialize)]
struct AdminPageResponse {
    users: Vec<UserProfile>,
}

/// Verify the session cookie or produce the hard-fail response: clear
/// the token and redirect to the public landing page.
fn verified_claims(jar: &CookieJar, config: &Config) -> std::result::Result<Claims, Response> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| reject_session(jar.clone(), config))?;

    verify_session_token(&token, &config.jwt_signing_key)
        .map_err(|_| reject_session(jar.clone(), config))
}

fn reject_session(jar: CookieJar, config: &Config) -> Response {
    (
        jar.add(removal_cookie(config.cookie_secure())),
        Redirect::temporary(HOME_PATH),
    )
        .into_response()
}

/// Per-user dashboard. Independent token verification, then the
/// subject's record.
async fn dashboard_page(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let claims = match verified_claims(&jar, &state.config) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match state.store.find_by_id(&claims.sub).await {
        Ok(Some(user)) => Json(DashboardResponse {
            user: UserProfile::from(user),
        })
        .into_response(),
        // A session outliving its account is a missing resource, not a
        // bad session.
        Ok(None) => AppError::NotFound(format!("User {} not found", claims.sub)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Admin user-management page. Authenticated-but-unauthorized visitors
/// are sent to the dashboard, not logged out.
async fn admin_page(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let claims = match verified_claims(&jar, &state.config) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    if !claims.admin {
        return Redirect::temporary(DASHBOARD_PATH).into_response();
    }

    match state.store.find_all().await {
        Ok(users) => Json(AdminPageResponse {
            users: users.into_iter().map(UserProfile::from).collect(),
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}
