//! Progress endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/progress
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<SubmitProgressRequest>,
) -> Result<Json<MessageResponse>> {
    let progress = payload.validate()?;
    state.progress.submit(&progress).await?;

    Ok(Json(MessageResponse {
        message: "Progress updated successfully".to_string(),
    }))
}

/// GET /api/progress/:user_id/:activity_type?lang=
pub async fn list(
    State(state): State<AppState>,
    Path((user_id, activity_type)): Path<(String, String)>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Vec<ProgressRecord>>> {
    let user_id = parse_user_id(&user_id)?;
    let activity_type = parse_activity(&activity_type)?;
    let lang = required_lang(query.lang)?;

    let records = state.progress.list(user_id, activity_type, &lang).await?;
    Ok(Json(records))
}

/// GET /api/levels/:user_id/:activity_type?lang=
pub async fn levels(
    State(state): State<AppState>,
    Path((user_id, activity_type)): Path<(String, String)>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Vec<LevelEntry>>> {
    let user_id = parse_user_id(&user_id)?;
    let activity_type = parse_activity(&activity_type)?;
    let lang = required_lang(query.lang)?;

    let levels = state
        .progress
        .level_map(user_id, activity_type, &lang, state.config.level_count)
        .await?;
    Ok(Json(levels))
}

/// GET /api/user-stats/:user_id
pub async fn user_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserStats>> {
    let user_id = parse_user_id(&user_id)?;
    let stats = state.progress.user_stats(user_id).await?;
    Ok(Json(stats))
}
