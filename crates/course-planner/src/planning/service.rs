use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PlannerConfig;

use super::advice::{AdviceEngine, PlanAdvice};
use super::catalog::{CatalogError, CourseCatalog, Department, Program};
use super::domain::{CompletedSet, Course, CourseCode, Difficulty, Preference, ScoredPlan};
use super::enumerator::{EnumerationStats, PlanEnumerator};
use super::prerequisites;
use super::ranker::PlanRanker;
use super::scoring::{FitnessComponent, FitnessScorer};
use super::validation::{PlanRequest, PlanRequestGuard, RequestViolation, ValidatedRequest};

const METHOD: &str = "exact-credit enumeration + fitness ranking + rule-based advice";

/// Service composing the catalog, request guard, search, ranking, and advice.
pub struct PlanningService<C> {
    catalog: Arc<C>,
    guard: PlanRequestGuard,
    enumerator: PlanEnumerator,
    ranker: PlanRanker,
    advisor: AdviceEngine,
}

impl<C> PlanningService<C>
where
    C: CourseCatalog + 'static,
{
    pub fn new(catalog: Arc<C>, config: PlannerConfig) -> Self {
        let guard = PlanRequestGuard::from_config(&config);
        Self {
            catalog,
            guard,
            enumerator: PlanEnumerator::new(config.limits),
            ranker: PlanRanker::new(FitnessScorer::new(config.weights)),
            advisor: AdviceEngine::new(config.advice_rules),
        }
    }

    pub fn departments(&self) -> Result<Vec<Department>, PlanningServiceError> {
        Ok(self.catalog.departments()?)
    }

    pub fn programs(&self, department_id: u32) -> Result<Vec<Program>, PlanningServiceError> {
        Ok(self.catalog.programs(department_id)?)
    }

    /// Validate a request and produce ranked, advised plans for it.
    pub fn plan(&self, request: PlanRequest) -> Result<PlanningResponse, PlanningServiceError> {
        let request = self.guard.validate(request)?;
        let ValidatedRequest {
            program_id,
            semester,
            target_credits,
            preference,
            cgpa,
            ref completed,
            exclude_completed,
            limit,
        } = request;

        let offered = self.catalog.courses_for_semester(program_id, semester)?;
        if offered.is_empty() {
            return Err(PlanningServiceError::NoCourses {
                program_id,
                semester,
            });
        }

        let completed = match completed {
            Some(explicit) => explicit.clone(),
            None => CompletedSet::from_courses(
                &self.catalog.courses_before_semester(program_id, semester)?,
            ),
        };

        let mut courses = distinct_by_code(offered);
        if exclude_completed {
            courses.retain(|course| !completed.contains(&course.code));
        }
        let available_credits: u32 = courses.iter().map(|course| course.credits).sum();

        debug!(
            program_id,
            semester,
            courses = courses.len(),
            completed = completed.len(),
            "loaded planning inputs"
        );

        let band = self.guard.credit_band();
        let enumeration = self.enumerator.enumerate_with_stats(
            &courses,
            target_credits,
            band.min,
            band.max,
            &completed,
        );
        let stats = enumeration.stats;
        if stats.budget_exhausted {
            warn!(
                explored = stats.subsets_explored,
                "subset budget exhausted; returning partial enumeration"
            );
        }

        if enumeration.plans.is_empty() {
            return Err(PlanningServiceError::NoExactCombination {
                target_credits,
                available_credits,
            });
        }

        let ranked =
            self.ranker
                .rank_scored(enumeration.plans, preference, target_credits, limit);

        let mut plans = Vec::with_capacity(ranked.len());
        for scored in ranked {
            if scored.plan.total_credits() != target_credits {
                warn!(
                    total = scored.plan.total_credits(),
                    expected = target_credits,
                    "dropping plan with mismatched credit total"
                );
                continue;
            }
            plans.push(self.plan_view(plans.len() + 1, scored, &request, &completed));
        }

        info!(
            program_id,
            semester,
            target_credits,
            preference = preference.label(),
            candidates = stats.preferred_plans + stats.fallback_plans,
            returned = plans.len(),
            "generated course plans"
        );

        Ok(PlanningResponse {
            success: true,
            program_id,
            semester,
            target_credits,
            preference,
            cgpa,
            completed_courses: completed.len(),
            plans,
            search: stats,
            method: METHOD,
        })
    }

    fn plan_view(
        &self,
        rank: usize,
        scored: ScoredPlan,
        request: &ValidatedRequest,
        completed: &CompletedSet,
    ) -> PlanView {
        let ScoredPlan { plan, fitness } = scored;
        let breakdown =
            self.ranker
                .scorer()
                .breakdown(&plan, request.preference, request.target_credits);

        let mut advice = self.advisor.advise(request.cgpa, &plan);
        if plan.all_prerequisites_met() {
            advice.advice.insert(
                0,
                format!(
                    "This plan provides exactly {} credits as requested",
                    request.target_credits
                ),
            );
        } else {
            advice.warnings.insert(
                0,
                format!(
                    "NOTE: {} course(s) in this plan have unmet prerequisites. They were \
                     included to meet your exact {} credit requirement.",
                    plan.violation_count(),
                    request.target_credits
                ),
            );
        }

        let courses = plan
            .courses()
            .iter()
            .map(|course| CourseView::new(course, request.semester, completed))
            .collect();

        PlanView {
            rank,
            total_credits: plan.total_credits(),
            course_count: plan.len(),
            all_prereqs_met: plan.all_prerequisites_met(),
            constraint_violations: plan.violation_count(),
            fitness,
            fitness_breakdown: breakdown.components,
            courses,
            expert_advice: advice,
        }
    }
}

/// Keeps the first course for every code.
fn distinct_by_code(courses: Vec<Course>) -> Vec<Course> {
    let mut seen = HashSet::new();
    let before = courses.len();
    let distinct: Vec<Course> = courses
        .into_iter()
        .filter(|course| seen.insert(course.code.clone()))
        .collect();
    if distinct.len() != before {
        warn!(
            dropped = before - distinct.len(),
            "catalog returned duplicate course codes"
        );
    }
    distinct
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanningResponse {
    pub success: bool,
    pub program_id: u32,
    pub semester: u8,
    pub target_credits: u32,
    pub preference: Preference,
    pub cgpa: f64,
    pub completed_courses: usize,
    pub plans: Vec<PlanView>,
    pub search: EnumerationStats,
    pub method: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub rank: usize,
    pub total_credits: u32,
    pub course_count: usize,
    pub all_prereqs_met: bool,
    pub constraint_violations: usize,
    pub fitness: f64,
    pub fitness_breakdown: Vec<FitnessComponent>,
    pub courses: Vec<CourseView>,
    pub expert_advice: PlanAdvice,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    pub code: CourseCode,
    pub name: String,
    pub description: String,
    pub credits: u32,
    pub difficulty: Difficulty,
    pub semester: u8,
    pub prerequisites: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_prerequisites: Vec<CourseCode>,
}

impl CourseView {
    fn new(course: &Course, semester: u8, completed: &CompletedSet) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            description: course.description.clone(),
            credits: course.credits,
            difficulty: course.difficulty,
            semester,
            prerequisites: course.prerequisites.display(),
            missing_prerequisites: prerequisites::missing(course, completed)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

/// Error raised by the planning service.
#[derive(Debug, thiserror::Error)]
pub enum PlanningServiceError {
    #[error(transparent)]
    Request(#[from] RequestViolation),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("no courses available for program {program_id} in semester {semester}")]
    NoCourses { program_id: u32, semester: u8 },
    #[error(
        "cannot generate a plan with exactly {target_credits} credits: the available courses \
         provide {available_credits} credits in total and no combination of them adds up to \
         {target_credits}. Try a different credit amount."
    )]
    NoExactCombination {
        target_credits: u32,
        available_credits: u32,
    },
}

impl PlanningServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlanningServiceError::Request(_) | PlanningServiceError::NoExactCombination { .. } => {
                StatusCode::BAD_REQUEST
            }
            PlanningServiceError::NoCourses { .. } => StatusCode::NOT_FOUND,
            PlanningServiceError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
