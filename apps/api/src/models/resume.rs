#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub full_name: String,
    pub email: String,
    pub summary: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub skill_name: String,
    /// 1=Beginner .. 5=Expert. Validated at the write boundary; scoring
    /// assumes it is already in range.
    pub proficiency_level: i32,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExperienceRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub company_name: String,
    pub job_title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
}
