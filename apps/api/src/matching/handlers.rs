use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine;
use crate::models::job_match::JobMatch;
use crate::state::AppState;

/// GET /api/v1/resumes/:id/matches
/// Persisted matches only — no recompute.
pub async fn handle_get_matches(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Vec<JobMatch>>, AppError> {
    let matches = engine::existing_matches(&state.db, resume_id).await?;
    Ok(Json(matches))
}

/// POST /api/v1/resumes/:id/matches/refresh
pub async fn handle_refresh_matches(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    engine::refresh_matches(&state.db, &state.scorer, resume_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
