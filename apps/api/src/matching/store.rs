//! Persisted match records — at most one row per (resume, role) pair.
//!
//! The `(resume_id, job_role_id)` unique index is the serialization point:
//! two concurrent recomputes race on the INSERT and the loser falls through
//! to the ON CONFLICT update, so a pair can never hold two rows.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::matching::scoring::ScoreBreakdown;
use crate::matching::skills;
use crate::models::job_match::MatchWithRoleRow;

/// Inserts or overwrites the match record for one pair in place (no history
/// retained). Returns the row id. Runs on the caller's transaction so a
/// whole recompute batch commits or aborts together.
pub async fn upsert_match(
    tx: &mut Transaction<'_, Postgres>,
    resume_id: Uuid,
    job_role_id: Uuid,
    breakdown: &ScoreBreakdown,
    matched_at: DateTime<Utc>,
) -> Result<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO resume_job_matches
            (id, resume_id, job_role_id, match_score, matched_skills, missing_skills, matched_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (resume_id, job_role_id) DO UPDATE
        SET match_score = EXCLUDED.match_score,
            matched_skills = EXCLUDED.matched_skills,
            missing_skills = EXCLUDED.missing_skills,
            matched_at = EXCLUDED.matched_at
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(resume_id)
    .bind(job_role_id)
    .bind(breakdown.score)
    .bind(skills::join_skills(&breakdown.matched))
    .bind(skills::join_skills(&breakdown.missing))
    .bind(matched_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(id)
}

/// All persisted matches for a resume, each resolved against its role.
/// A match whose role has been deleted resolves to the "Unknown" sentinel
/// instead of propagating an error.
pub async fn matches_for_resume(pool: &PgPool, resume_id: Uuid) -> Result<Vec<MatchWithRoleRow>> {
    Ok(sqlx::query_as(
        r#"
        SELECT m.id, m.resume_id, m.job_role_id, m.match_score,
               m.matched_skills, m.missing_skills, m.matched_at,
               COALESCE(r.role_name, 'Unknown') AS role_name,
               r.description AS role_description
        FROM resume_job_matches m
        LEFT JOIN job_roles r ON r.id = m.job_role_id
        WHERE m.resume_id = $1
        ORDER BY m.match_score DESC, m.matched_at, m.id
        "#,
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?)
}
