use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::PlannerConfig;

use super::domain::{CompletedSet, Preference};

const MIN_SEMESTER: i64 = 1;
const MAX_SEMESTER: i64 = 8;
const MAX_CGPA: f64 = 4.0;
const DEFAULT_CGPA: f64 = 3.0;

/// Inbound planning request as submitted by the UI or CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub program_id: u32,
    pub semester: i64,
    #[serde(alias = "max_credits")]
    pub target_credits: i64,
    #[serde(default)]
    pub preference: Option<String>,
    #[serde(default)]
    pub cgpa: Option<f64>,
    /// Explicit completed course codes; when absent every course of the earlier
    /// semesters counts as completed.
    #[serde(default)]
    pub completed_courses: Option<Vec<String>>,
    /// Drop courses the student already completed from the candidates.
    #[serde(default)]
    pub exclude_completed: bool,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Inclusive credit range a target must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBand {
    pub min: u32,
    pub max: u32,
}

impl Default for CreditBand {
    fn default() -> Self {
        Self { min: 11, max: 24 }
    }
}

impl CreditBand {
    pub fn contains(&self, credits: u32) -> bool {
        (self.min..=self.max).contains(&credits)
    }
}

/// What to do with a preference string that names no known tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPreferencePolicy {
    #[default]
    FallbackBalanced,
    Reject,
}

impl UnknownPreferencePolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "balanced" | "fallback" | "fallback_balanced" => Some(Self::FallbackBalanced),
            "reject" | "error" => Some(Self::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RequestViolation {
    #[error("semester must be 1-8 (got {0})")]
    SemesterOutOfRange(i64),
    #[error("credits must be {min}-{max} (got {requested})")]
    CreditsOutOfRange { requested: i64, min: u32, max: u32 },
    #[error("CGPA must be 0.0-4.0 (got {0})")]
    CgpaOutOfRange(f64),
    #[error("unknown preference '{0}': expected easy, balanced, or challenging")]
    UnknownPreference(String),
    #[error("limit must be 1-{max} (got {requested})")]
    LimitOutOfRange { requested: usize, max: usize },
}

/// Request after validation, with defaults resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub program_id: u32,
    pub semester: u8,
    pub target_credits: u32,
    pub preference: Preference,
    pub cgpa: f64,
    pub completed: Option<CompletedSet>,
    pub exclude_completed: bool,
    pub limit: usize,
}

/// Guard turning raw [`PlanRequest`]s into [`ValidatedRequest`]s.
#[derive(Debug, Clone)]
pub struct PlanRequestGuard {
    credit_band: CreditBand,
    unknown_preference: UnknownPreferencePolicy,
    default_limit: usize,
    max_limit: usize,
}

impl Default for PlanRequestGuard {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}

impl PlanRequestGuard {
    pub fn from_config(config: &PlannerConfig) -> Self {
        let max_limit = config.limits.max_plans.max(1);
        Self {
            credit_band: config.credit_band,
            unknown_preference: config.unknown_preference,
            default_limit: config.result_limit.clamp(1, max_limit),
            max_limit,
        }
    }

    pub fn credit_band(&self) -> CreditBand {
        self.credit_band
    }

    pub fn validate(&self, request: PlanRequest) -> Result<ValidatedRequest, RequestViolation> {
        if !(MIN_SEMESTER..=MAX_SEMESTER).contains(&request.semester) {
            return Err(RequestViolation::SemesterOutOfRange(request.semester));
        }

        let target_credits = u32::try_from(request.target_credits)
            .ok()
            .filter(|credits| self.credit_band.contains(*credits))
            .ok_or(RequestViolation::CreditsOutOfRange {
                requested: request.target_credits,
                min: self.credit_band.min,
                max: self.credit_band.max,
            })?;

        let cgpa = request.cgpa.unwrap_or(DEFAULT_CGPA);
        if !cgpa.is_finite() || !(0.0..=MAX_CGPA).contains(&cgpa) {
            return Err(RequestViolation::CgpaOutOfRange(cgpa));
        }

        let preference = self.resolve_preference(request.preference.as_deref())?;

        let limit = request.limit.unwrap_or(self.default_limit);
        if limit == 0 || limit > self.max_limit {
            return Err(RequestViolation::LimitOutOfRange {
                requested: limit,
                max: self.max_limit,
            });
        }

        Ok(ValidatedRequest {
            program_id: request.program_id,
            semester: request.semester as u8,
            target_credits,
            preference,
            cgpa,
            completed: request
                .completed_courses
                .map(|codes| codes.into_iter().collect()),
            exclude_completed: request.exclude_completed,
            limit,
        })
    }

    fn resolve_preference(&self, raw: Option<&str>) -> Result<Preference, RequestViolation> {
        let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
            return Ok(Preference::default());
        };

        match (Preference::parse(raw), self.unknown_preference) {
            (Some(preference), _) => Ok(preference),
            (None, UnknownPreferencePolicy::FallbackBalanced) => {
                warn!(preference = raw, "unknown preference, falling back to balanced");
                Ok(Preference::Balanced)
            }
            (None, UnknownPreferencePolicy::Reject) => {
                Err(RequestViolation::UnknownPreference(raw.to_string()))
            }
        }
    }
}
