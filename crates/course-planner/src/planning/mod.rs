//! Semester course planning: catalog access, exact-credit plan search, fitness
//! ranking, and rule-based advice.

pub mod advice;
pub mod catalog;
pub mod domain;
pub mod enumerator;
pub mod import;
pub(crate) mod prerequisites;
pub mod ranker;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use advice::{AdviceEngine, AdviceRules, AdviceStats, PlanAdvice};
pub use catalog::{CatalogError, CourseCatalog, Department, InMemoryCourseCatalog, Program};
pub use domain::{
    CompletedSet, Course, CourseCode, Difficulty, Plan, Preference, Prerequisites, ScoredPlan,
};
pub use enumerator::{Enumeration, EnumerationStats, PlanEnumerator, SearchLimits};
pub use import::{CatalogImportError, CatalogImporter};
pub use ranker::{PlanRanker, DEFAULT_RESULT_LIMIT};
pub use router::planning_router;
pub use scoring::{FitnessBreakdown, FitnessComponent, FitnessScorer, FitnessTerm, FitnessWeights};
pub use service::{CourseView, PlanView, PlanningResponse, PlanningService, PlanningServiceError};
pub use validation::{
    CreditBand, PlanRequest, PlanRequestGuard, RequestViolation, UnknownPreferencePolicy,
    ValidatedRequest,
};
