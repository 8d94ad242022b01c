//! Read-side collaborators: the resume aggregate and the active role set.

use std::collections::BTreeMap;

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::matching::scoring::ExperiencePeriod;
use crate::matching::skills;
use crate::models::job_role::JobRoleRow;
use crate::models::resume::{ExperienceRow, ResumeRow, SkillRow};

/// Scoring view of one resume: normalized skill tokens with proficiency,
/// plus raw experience periods. Immutable for the duration of one pass.
#[derive(Debug, Clone)]
pub struct ResumeProfile {
    pub resume_id: Uuid,
    /// Normalized token -> proficiency level (1-5). If a resume lists the
    /// same skill twice the later row wins.
    pub skills: BTreeMap<String, i32>,
    pub experience: Vec<ExperiencePeriod>,
}

/// Loads the resume aggregate needed for scoring. Returns `None` when the
/// resume is absent — reads are lenient and the engine maps this to an
/// empty match list rather than an error.
pub async fn load_profile(pool: &PgPool, resume_id: Uuid) -> Result<Option<ResumeProfile>> {
    let resume: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await?;
    let Some(resume) = resume else {
        return Ok(None);
    };

    let skill_rows: Vec<SkillRow> = sqlx::query_as("SELECT * FROM skills WHERE resume_id = $1")
        .bind(resume_id)
        .fetch_all(pool)
        .await?;

    let experience_rows: Vec<ExperienceRow> = sqlx::query_as(
        "SELECT * FROM experience_details WHERE resume_id = $1 ORDER BY start_date",
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?;

    let mut skill_map = BTreeMap::new();
    for row in &skill_rows {
        skill_map.insert(skills::normalize(&row.skill_name), row.proficiency_level);
    }

    let experience = experience_rows
        .into_iter()
        .map(|row| ExperiencePeriod {
            start: row.start_date,
            end: row.end_date,
            is_current: row.is_current,
        })
        .collect();

    Ok(Some(ResumeProfile {
        resume_id: resume.id,
        skills: skill_map,
        experience,
    }))
}

/// Active roles only, in stable creation order — ranking ties keep this order.
pub async fn active_roles(pool: &PgPool) -> Result<Vec<JobRoleRow>> {
    Ok(sqlx::query_as(
        "SELECT * FROM job_roles WHERE is_active = TRUE ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?)
}
