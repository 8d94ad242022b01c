#![allow(dead_code)]

//! Match scoring — deterministic scoring of a resume profile against a job
//! role's skill requirements and expected-experience band.
//!
//! The arithmetic lives in pure functions with the clock injected as `today`,
//! so every bonus path is testable without a database or wall time.
//! `AppState` holds an `Arc<dyn MatchScorer>`, so an alternative backend can
//! be swapped at startup without touching the engine or handlers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::repo::ResumeProfile;
use crate::matching::skills;
use crate::models::job_role::JobRoleRow;

// ────────────────────────────────────────────────────────────────────────────
// Input / output data models
// ────────────────────────────────────────────────────────────────────────────

/// One employment period from a resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperiencePeriod {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub is_current: bool,
}

/// Expected-experience band attached to a job role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
    /// Present but unrecognized — scored with the mid-level expectation.
    Other,
}

impl ExperienceLevel {
    /// Parses the free-text level stored on a role. Returns `None` for
    /// absent or blank input, which disables the experience bonus entirely.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.to_lowercase().as_str() {
            "entry" => Self::Entry,
            "mid" => Self::Mid,
            "senior" => Self::Senior,
            "lead" => Self::Lead,
            _ => Self::Other,
        })
    }

    pub fn expected_years(self) -> f64 {
        match self {
            Self::Entry => 1.0,
            Self::Mid | Self::Other => 3.0,
            Self::Senior => 5.0,
            Self::Lead => 8.0,
        }
    }
}

/// Full scoring result for one (resume, role) pair.
///
/// `matched`/`missing` are normalized tokens in required-sequence order
/// (first occurrence wins for duplicates), so output order is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Capped at 100. Not floored at 0 — see `score_role`.
    pub score: f64,
    pub base: f64,
    pub proficiency_bonus: f64,
    pub experience_bonus: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer seam. Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(
        &self,
        profile: &ResumeProfile,
        role: &JobRoleRow,
        today: NaiveDate,
    ) -> Result<ScoreBreakdown, AppError>;
}

/// Default backend: skill-overlap percentage plus proficiency and
/// experience bonuses. Pure Rust, no I/O.
pub struct SkillOverlapScorer;

#[async_trait]
impl MatchScorer for SkillOverlapScorer {
    async fn score(
        &self,
        profile: &ResumeProfile,
        role: &JobRoleRow,
        today: NaiveDate,
    ) -> Result<ScoreBreakdown, AppError> {
        let required = skills::split_required_skills(&role.required_skills);
        let level = ExperienceLevel::parse(role.experience_level.as_deref());
        Ok(score_role(
            &profile.skills,
            &profile.experience,
            &required,
            level,
            today,
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores one role against a profile's normalized skill map and experience
/// periods.
///
/// - Base: share of the role's distinct required tokens present in the
///   profile, as a percentage. Zero when nothing is required.
/// - Proficiency bonus: (avg proficiency over matched tokens − 3) × 1.5,
///   structurally within [−3, 3]; zero when nothing matched.
/// - Experience bonus: (total years − expected years) × 2, clamped to
///   [−10, 5]; zero when the role has no level or the profile no periods.
///
/// The total is capped at 100 but NOT floored at 0: a large negative
/// experience bonus over a zero base goes negative.
/// TODO: confirm with product whether a [0, 100] clamp is intended before
/// changing this.
///
/// Rounding is half-away-from-zero to two decimals (`f64::round` semantics).
pub fn score_role(
    profile_skills: &BTreeMap<String, i32>,
    periods: &[ExperiencePeriod],
    required: &[String],
    level: Option<ExperienceLevel>,
    today: NaiveDate,
) -> ScoreBreakdown {
    let distinct = distinct_tokens(required);

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for token in &distinct {
        if profile_skills.contains_key(*token) {
            matched.push((*token).to_string());
        } else {
            missing.push((*token).to_string());
        }
    }

    let base = if distinct.is_empty() {
        0.0
    } else {
        matched.len() as f64 / distinct.len() as f64 * 100.0
    };

    let proficiency_bonus = proficiency_bonus(profile_skills, &matched);
    let experience_bonus = experience_bonus(periods, level, today);

    let total = (base + proficiency_bonus + experience_bonus).min(100.0);

    ScoreBreakdown {
        score: round2(total),
        base: round2(base),
        proficiency_bonus: round2(proficiency_bonus),
        experience_bonus: round2(experience_bonus),
        matched,
        missing,
    }
}

/// Base-percentage score alone: share of a role's distinct required skills
/// present in `user_skills`. No bonuses, no persistence — used for quick
/// previews against a raw comma-delimited requirement string.
pub fn quick_score(user_skills: &[String], required_csv: &str) -> f64 {
    let required = skills::split_required_skills(required_csv);
    let distinct = distinct_tokens(&required);
    if distinct.is_empty() {
        return 0.0;
    }
    let user: Vec<String> = user_skills.iter().map(|s| skills::normalize(s)).collect();
    let matched = distinct
        .iter()
        .filter(|token| user.iter().any(|u| u == *token))
        .count();
    round2(matched as f64 / distinct.len() as f64 * 100.0)
}

/// Collapses duplicates in the required sequence; first occurrence keeps
/// its position.
fn distinct_tokens(required: &[String]) -> Vec<&str> {
    let mut distinct: Vec<&str> = Vec::new();
    for token in required {
        if !distinct.contains(&token.as_str()) {
            distinct.push(token);
        }
    }
    distinct
}

fn proficiency_bonus(profile_skills: &BTreeMap<String, i32>, matched: &[String]) -> f64 {
    if matched.is_empty() {
        return 0.0;
    }
    let levels: Vec<i32> = matched
        .iter()
        .filter_map(|token| profile_skills.get(token).copied())
        .collect();
    if levels.is_empty() {
        return 0.0;
    }
    let avg = levels.iter().sum::<i32>() as f64 / levels.len() as f64;
    (avg - 3.0) * 1.5
}

fn experience_bonus(
    periods: &[ExperiencePeriod],
    level: Option<ExperienceLevel>,
    today: NaiveDate,
) -> f64 {
    let Some(level) = level else {
        return 0.0;
    };
    if periods.is_empty() {
        return 0.0;
    }
    let total_years: f64 = periods
        .iter()
        .map(|period| {
            // A current position runs to today; an open-ended past one too.
            let end = if period.is_current {
                today
            } else {
                period.end.unwrap_or(today)
            };
            (end - period.start).num_days() as f64 / 365.0
        })
        .sum();
    let diff = total_years - level.expected_years();
    (diff * 2.0).clamp(-10.0, 5.0)
}

/// Half-away-from-zero rounding to two decimals.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(entries: &[(&str, i32)]) -> BTreeMap<String, i32> {
        entries
            .iter()
            .map(|(name, level)| (name.to_string(), *level))
            .collect()
    }

    fn required(raw: &str) -> Vec<String> {
        skills::split_required_skills(raw)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn period(start: NaiveDate, end: Option<NaiveDate>, is_current: bool) -> ExperiencePeriod {
        ExperiencePeriod {
            start,
            end,
            is_current,
        }
    }

    #[test]
    fn test_backend_developer_scenario() {
        // skills {c# @4, javascript @3}, required "C#,SQL,API", no experience,
        // level unspecified: base 33.33 + proficiency 1.5 = 34.83
        let skills = profile(&[("c#", 4), ("javascript", 3)]);
        let breakdown = score_role(&skills, &[], &required("C#,SQL,API"), None, today());

        assert_eq!(breakdown.matched, vec!["c#"]);
        assert_eq!(breakdown.missing, vec!["sql", "api"]);
        assert_eq!(breakdown.base, 33.33);
        assert_eq!(breakdown.proficiency_bonus, 1.5);
        assert_eq!(breakdown.experience_bonus, 0.0);
        assert_eq!(breakdown.score, 34.83);
    }

    #[test]
    fn test_zero_skill_resume_misses_everything() {
        let skills = profile(&[]);
        let breakdown = score_role(&skills, &[], &required("Rust, SQL ,api"), None, today());

        assert!(breakdown.matched.is_empty());
        assert_eq!(breakdown.missing, vec!["rust", "sql", "api"]);
        assert_eq!(breakdown.score, 0.0);
    }

    #[test]
    fn test_empty_required_yields_zero_base() {
        let skills = profile(&[("rust", 5)]);
        let breakdown = score_role(&skills, &[], &required(""), None, today());

        assert_eq!(breakdown.base, 0.0);
        assert!(breakdown.matched.is_empty());
        assert!(breakdown.missing.is_empty());
        assert_eq!(breakdown.score, 0.0);
    }

    #[test]
    fn test_duplicate_required_tokens_collapse() {
        let skills = profile(&[("c#", 3)]);
        let breakdown = score_role(&skills, &[], &required("sql,C#,SQL"), None, today());

        // Distinct set is {sql, c#}: one of two matched
        assert_eq!(breakdown.base, 50.0);
        assert_eq!(breakdown.matched, vec!["c#"]);
        assert_eq!(breakdown.missing, vec!["sql"]);
    }

    #[test]
    fn test_proficiency_bonus_bounds() {
        let beginner = profile(&[("rust", 1), ("sql", 1)]);
        let expert = profile(&[("rust", 5), ("sql", 5)]);
        let req = required("rust,sql");

        let low = score_role(&beginner, &[], &req, None, today());
        let high = score_role(&expert, &[], &req, None, today());

        assert_eq!(low.proficiency_bonus, -3.0);
        assert_eq!(high.proficiency_bonus, 3.0);
    }

    #[test]
    fn test_proficiency_bonus_zero_when_nothing_matched() {
        let skills = profile(&[("python", 5)]);
        let breakdown = score_role(&skills, &[], &required("rust"), None, today());
        assert_eq!(breakdown.proficiency_bonus, 0.0);
    }

    #[test]
    fn test_experience_bonus_zero_without_level() {
        let periods = vec![period(
            NaiveDate::from_ymd_opt(2016, 6, 1).unwrap(),
            None,
            true,
        )];
        let breakdown = score_role(&profile(&[]), &periods, &required("rust"), None, today());
        assert_eq!(breakdown.experience_bonus, 0.0);
    }

    #[test]
    fn test_experience_bonus_zero_without_periods() {
        let breakdown = score_role(
            &profile(&[]),
            &[],
            &required("rust"),
            Some(ExperienceLevel::Senior),
            today(),
        );
        assert_eq!(breakdown.experience_bonus, 0.0);
    }

    #[test]
    fn test_experience_bonus_exact_two_years_entry() {
        // 730 days / 365 = exactly 2.0 years; entry expects 1 -> diff 1 -> +2
        let start = today() - chrono::Duration::days(730);
        let periods = vec![period(start, None, true)];
        let breakdown = score_role(
            &profile(&[]),
            &periods,
            &required("rust"),
            Some(ExperienceLevel::Entry),
            today(),
        );
        assert_eq!(breakdown.experience_bonus, 2.0);
    }

    #[test]
    fn test_experience_bonus_clamped_high() {
        // 20+ years against entry expectation clamps at +5
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let periods = vec![period(start, None, true)];
        let breakdown = score_role(
            &profile(&[]),
            &periods,
            &required("rust"),
            Some(ExperienceLevel::Entry),
            today(),
        );
        assert_eq!(breakdown.experience_bonus, 5.0);
    }

    #[test]
    fn test_experience_bonus_clamped_low() {
        // Zero-length period against lead expectation: (0 - 8) * 2 clamps at -10
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let periods = vec![period(day, Some(day), false)];
        let breakdown = score_role(
            &profile(&[]),
            &periods,
            &required("rust"),
            Some(ExperienceLevel::Lead),
            today(),
        );
        assert_eq!(breakdown.experience_bonus, -10.0);
    }

    #[test]
    fn test_current_period_ignores_recorded_end() {
        // is_current overrides a stale end date: runs to today
        let start = today() - chrono::Duration::days(365);
        let stale_end = start + chrono::Duration::days(1);
        let periods = vec![period(start, Some(stale_end), true)];
        let breakdown = score_role(
            &profile(&[]),
            &periods,
            &required("rust"),
            Some(ExperienceLevel::Entry),
            today(),
        );
        // Exactly 1.0 year against entry's 1 expected: diff 0
        assert_eq!(breakdown.experience_bonus, 0.0);
    }

    #[test]
    fn test_score_capped_at_100() {
        // Perfect match at expert proficiency with surplus experience
        let skills = profile(&[("rust", 5), ("sql", 5)]);
        let start = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
        let periods = vec![period(start, None, true)];
        let breakdown = score_role(
            &skills,
            &periods,
            &required("rust,sql"),
            Some(ExperienceLevel::Senior),
            today(),
        );
        assert_eq!(breakdown.score, 100.0);
    }

    #[test]
    fn test_score_not_floored_below_zero() {
        // Empty required set, max experience penalty: total goes negative
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let periods = vec![period(day, Some(day), false)];
        let breakdown = score_role(
            &profile(&[]),
            &periods,
            &required(""),
            Some(ExperienceLevel::Senior),
            today(),
        );
        assert_eq!(breakdown.score, -10.0);
        assert!(breakdown.matched.is_empty());
        assert!(breakdown.missing.is_empty());
    }

    #[test]
    fn test_score_monotonic_in_matched_fraction() {
        // Proficiency 3 keeps the bonus at zero; base alone drives the score
        let req = required("a,b,c");
        let one = score_role(&profile(&[("a", 3)]), &[], &req, None, today());
        let two = score_role(&profile(&[("a", 3), ("b", 3)]), &[], &req, None, today());
        let all = score_role(
            &profile(&[("a", 3), ("b", 3), ("c", 3)]),
            &[],
            &req,
            None,
            today(),
        );
        assert!(one.score < two.score);
        assert!(two.score < all.score);
        assert_eq!(all.score, 100.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let skills = profile(&[("c#", 4), ("javascript", 3)]);
        let req = required("C#,SQL,API");
        let first = score_role(&skills, &[], &req, None, today());
        let second = score_role(&skills, &[], &req, None, today());
        assert_eq!(first, second);
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.375), -0.38);
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(34.833_333), 34.83);
    }

    #[test]
    fn test_experience_level_parse() {
        assert_eq!(ExperienceLevel::parse(None), None);
        assert_eq!(ExperienceLevel::parse(Some("")), None);
        assert_eq!(ExperienceLevel::parse(Some("  ")), None);
        assert_eq!(
            ExperienceLevel::parse(Some("Senior")),
            Some(ExperienceLevel::Senior)
        );
        assert_eq!(
            ExperienceLevel::parse(Some("LEAD")),
            Some(ExperienceLevel::Lead)
        );
        assert_eq!(
            ExperienceLevel::parse(Some("guru")),
            Some(ExperienceLevel::Other)
        );
    }

    #[test]
    fn test_experience_level_expected_years() {
        assert_eq!(ExperienceLevel::Entry.expected_years(), 1.0);
        assert_eq!(ExperienceLevel::Mid.expected_years(), 3.0);
        assert_eq!(ExperienceLevel::Senior.expected_years(), 5.0);
        assert_eq!(ExperienceLevel::Lead.expected_years(), 8.0);
        assert_eq!(ExperienceLevel::Other.expected_years(), 3.0);
    }

    #[test]
    fn test_quick_score_base_percentage_only() {
        let user = vec!["C#".to_string(), "Javascript".to_string()];
        assert_eq!(quick_score(&user, "C#,SQL,API"), 33.33);
        assert_eq!(quick_score(&user, ""), 0.0);
        assert_eq!(quick_score(&[], "C#"), 0.0);
    }
}
