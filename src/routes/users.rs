// SPDX-License-Identifier: MIT

//! Admin user-management API: update and delete.

use axum::{
    extract::{Path, State},
    routing::put,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{UserProfile, UserUpdate};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/{id}", put(update_user).delete(delete_user))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Merge a partial document over the stored record and return the full
/// updated record. Any `id` in the body is ignored (see `UserUpdate`).
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserProfile>> {
    let updated = state
        .store
        .update(&id, update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

    tracing::info!(user_id = %id, "User updated");
    Ok(Json(UserProfile::from(updated)))
}

/// Delete a user record by id. No cascading cleanup exists because no
/// dependent entities exist.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if id.trim().is_empty() {
        return Err(AppError::Validation("User ID is required".to_string()));
    }

    if !state.store.delete(&id).await? {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }

    Ok(Json(DeleteResponse {
        message: "User deleted successfully".to_string(),
    }))
}
