//! Question bank endpoints
//!
//! A level with no questions yields an empty array, never an error.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

async fn fetch(
    state: &AppState,
    activity_type: ActivityType,
    level: &str,
    query: LangQuery,
) -> Result<Json<ContentRows>> {
    let level = parse_level(level)?;
    let lang = normalize_lang(query.lang).unwrap_or_else(|| state.config.default_lang.clone());

    let rows = state.db.get_content(activity_type, level, &lang).await?;
    tracing::debug!(
        activity = %activity_type,
        level,
        lang = %lang,
        count = rows.len(),
        "content fetched"
    );

    Ok(Json(rows))
}

/// GET /api/vocabulary/:level
pub async fn vocabulary(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<ContentRows>> {
    fetch(&state, ActivityType::Vocabulary, &level, query).await
}

/// GET /api/grammar_questions/:level
pub async fn grammar(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<ContentRows>> {
    fetch(&state, ActivityType::Grammar, &level, query).await
}

/// GET /api/fill-blank/:level
pub async fn fill_blank(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<ContentRows>> {
    fetch(&state, ActivityType::FillInBlank, &level, query).await
}

/// GET /api/image_questions/:level
pub async fn image_questions(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<ContentRows>> {
    fetch(&state, ActivityType::ImageBased, &level, query).await
}

/// GET /api/sentences/:level
pub async fn sentences(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<ContentRows>> {
    fetch(&state, ActivityType::Sentences, &level, query).await
}
