use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Read-back row: one persisted match joined against its owning role.
/// `role_name` is COALESCEd to the "Unknown" sentinel when the role is gone.
#[derive(Debug, Clone, FromRow)]
pub struct MatchWithRoleRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_role_id: Uuid,
    pub match_score: f64,
    /// Comma-joined normalized tokens (storage encoding).
    pub matched_skills: String,
    pub missing_skills: String,
    pub matched_at: DateTime<Utc>,
    pub role_name: String,
    pub role_description: Option<String>,
}

/// API shape for one resume-to-role match. Skill names are display-cased;
/// the comma-delimited storage encoding never crosses this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    pub match_id: Uuid,
    pub resume_id: Uuid,
    pub job_role_id: Uuid,
    pub role_name: String,
    pub role_description: Option<String>,
    /// Bounded to [0, 100] above; see scoring for the unfloored low end.
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_at: DateTime<Utc>,
}
