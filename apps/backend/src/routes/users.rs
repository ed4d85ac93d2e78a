//! User directory endpoint

use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::models::{SyncUserRequest, UserResponse};
use crate::AppState;

/// POST /api/sync-user
/// Returns the user for an email, creating it on first sight
pub async fn sync_user(
    State(state): State<AppState>,
    Json(payload): Json<SyncUserRequest>,
) -> Result<Json<UserResponse>> {
    let email = payload
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::validation("Missing email"))?;

    let name = email.split('@').next().unwrap_or(&email).to_string();
    let user = state.db.sync_user(&email, &name).await?;

    tracing::info!(user_id = user.id, "synced user");

    Ok(Json(user.into()))
}
