#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRoleRow {
    pub id: Uuid,
    pub role_name: String,
    pub description: Option<String>,
    /// Comma-delimited skill tokens, free text at the write boundary.
    pub required_skills: String,
    pub category: Option<String>,
    /// Free text; parsed into `ExperienceLevel` by the scorer.
    pub experience_level: Option<String>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
