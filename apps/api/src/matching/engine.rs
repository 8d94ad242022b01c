//! Match orchestration: load the resume and active roles, score every pair,
//! persist, and return the ranked list.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::repo;
use crate::matching::scoring::MatchScorer;
use crate::matching::skills;
use crate::matching::store;
use crate::models::job_match::JobMatch;

/// Recomputes and persists matches for every active role, returning them
/// ranked by score descending. An absent resume yields an empty list.
///
/// All upserts share one transaction with a single commit: a persistence
/// failure aborts the whole batch, so callers never observe some roles
/// refreshed and others stale. Retrying is safe — the upsert is idempotent
/// per (resume, role) pair.
pub async fn recompute_matches(
    pool: &PgPool,
    scorer: &Arc<dyn MatchScorer>,
    resume_id: Uuid,
) -> Result<Vec<JobMatch>, AppError> {
    let Some(profile) = repo::load_profile(pool, resume_id).await? else {
        return Ok(Vec::new());
    };
    let roles = repo::active_roles(pool).await?;

    let now = Utc::now();
    let today = now.date_naive();

    let mut breakdowns = Vec::with_capacity(roles.len());
    for role in &roles {
        breakdowns.push(scorer.score(&profile, role, today).await?);
    }

    let mut tx = pool.begin().await.map_err(AppError::Database)?;
    let mut matches = Vec::with_capacity(roles.len());
    for (role, breakdown) in roles.iter().zip(&breakdowns) {
        let match_id = store::upsert_match(&mut tx, resume_id, role.id, breakdown, now).await?;
        matches.push(JobMatch {
            match_id,
            resume_id,
            job_role_id: role.id,
            role_name: role.role_name.clone(),
            role_description: role.description.clone(),
            score: breakdown.score,
            matched_skills: display_cased(&breakdown.matched),
            missing_skills: display_cased(&breakdown.missing),
            matched_at: now,
        });
    }
    tx.commit().await.map_err(AppError::Database)?;

    info!("Recomputed {} matches for resume {resume_id}", matches.len());

    rank_matches(&mut matches);
    Ok(matches)
}

/// Reads persisted matches without recomputing, ranked score descending.
/// Roles deleted since the last recompute surface as "Unknown".
pub async fn existing_matches(pool: &PgPool, resume_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
    let rows = store::matches_for_resume(pool, resume_id).await?;

    let mut matches: Vec<JobMatch> = rows
        .into_iter()
        .map(|row| JobMatch {
            match_id: row.id,
            resume_id: row.resume_id,
            job_role_id: row.job_role_id,
            role_name: row.role_name,
            role_description: row.role_description,
            score: row.match_score,
            matched_skills: display_cased(&skills::parse_skill_list(&row.matched_skills)),
            missing_skills: display_cased(&skills::parse_skill_list(&row.missing_skills)),
            matched_at: row.matched_at,
        })
        .collect();

    rank_matches(&mut matches);
    Ok(matches)
}

/// `recompute_matches` discarding the result — the refresh endpoint's shape.
pub async fn refresh_matches(
    pool: &PgPool,
    scorer: &Arc<dyn MatchScorer>,
    resume_id: Uuid,
) -> Result<(), AppError> {
    recompute_matches(pool, scorer, resume_id).await?;
    Ok(())
}

/// Stable descending sort by score — ties keep the input order, which for
/// recompute is the active-role query order.
fn rank_matches(matches: &mut [JobMatch]) {
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
}

fn display_cased(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|token| skills::display_case(token)).collect()
}
