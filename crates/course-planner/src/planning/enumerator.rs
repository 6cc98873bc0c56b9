use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{CompletedSet, Course, CourseCode, Plan};
use super::prerequisites;

/// Caps bounding the combinatorial search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Plan count after which no further subset size is explored.
    pub max_plans: usize,
    /// The unrestricted fallback search only runs below this many preferred plans.
    pub fallback_threshold: usize,
    /// Largest subset size examined by the fallback search.
    pub fallback_max_subset_size: usize,
    /// Upper bound on partial subsets visited across both tiers.
    pub max_subsets_explored: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_plans: 50,
            fallback_threshold: 10,
            fallback_max_subset_size: 15,
            max_subsets_explored: Some(5_000_000),
        }
    }
}

/// Counters describing how much of the search space was covered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnumerationStats {
    pub preferred_courses: usize,
    pub preferred_plans: usize,
    pub fallback_plans: usize,
    pub fallback_ran: bool,
    pub subsets_explored: u64,
    pub budget_exhausted: bool,
}

/// Enumerated plans together with the search counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Enumeration {
    pub plans: Vec<Plan>,
    pub stats: EnumerationStats,
}

/// Finds course subsets whose credits add up to an exact target.
///
/// The search runs in two tiers. The first only draws from courses the student
/// may take right now; the second, used when the first comes up short, draws
/// from every offered course and records how many members have unmet
/// prerequisites. Within a tier, subsets are visited by increasing size and,
/// inside a size, in lexicographic order of their positions in the input.
#[derive(Debug, Clone, Default)]
pub struct PlanEnumerator {
    limits: SearchLimits,
}

impl PlanEnumerator {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn enumerate(
        &self,
        courses: &[Course],
        target_credits: u32,
        min_credits: u32,
        max_credits: u32,
        completed: &CompletedSet,
    ) -> Vec<Plan> {
        self.enumerate_with_stats(courses, target_credits, min_credits, max_credits, completed)
            .plans
    }

    pub fn enumerate_with_stats(
        &self,
        courses: &[Course],
        target_credits: u32,
        min_credits: u32,
        max_credits: u32,
        completed: &CompletedSet,
    ) -> Enumeration {
        let preferred = preferred_courses(courses, completed);
        let mut search = Search {
            target: target_credits,
            band: (min_credits, max_credits),
            completed,
            limits: &self.limits,
            plans: Vec::new(),
            emitted: HashSet::new(),
            explored: 0,
            exhausted: false,
        };

        search.run_tier(&preferred, preferred.len());
        let preferred_plans = search.plans.len();

        let fallback_ran = preferred_plans < self.limits.fallback_threshold
            && preferred_plans < self.limits.max_plans
            && !search.exhausted;
        if fallback_ran {
            let everything: Vec<&Course> = courses.iter().collect();
            let max_size = everything.len().min(self.limits.fallback_max_subset_size);
            search.run_tier(&everything, max_size);
        }

        let stats = EnumerationStats {
            preferred_courses: preferred.len(),
            preferred_plans,
            fallback_plans: search.plans.len() - preferred_plans,
            fallback_ran,
            subsets_explored: search.explored,
            budget_exhausted: search.exhausted,
        };

        let mut plans = search.plans;
        plans.sort_by_key(|plan| {
            (
                !plan.all_prerequisites_met(),
                plan.violation_count(),
                plan.total_credits().abs_diff(target_credits),
            )
        });

        Enumeration { plans, stats }
    }
}

/// Courses whose prerequisites are met, plus courses without any, unioned by code
/// in input order.
fn preferred_courses<'a>(courses: &'a [Course], completed: &CompletedSet) -> Vec<&'a Course> {
    let satisfied = courses
        .iter()
        .filter(|course| prerequisites::satisfied(course, completed));
    let unconstrained = courses
        .iter()
        .filter(|course| course.prerequisites.is_empty());

    let mut seen = HashSet::new();
    satisfied
        .chain(unconstrained)
        .filter(|course| seen.insert(&course.code))
        .collect()
}

struct Search<'a> {
    target: u32,
    band: (u32, u32),
    completed: &'a CompletedSet,
    limits: &'a SearchLimits,
    plans: Vec<Plan>,
    emitted: HashSet<Vec<CourseCode>>,
    explored: u64,
    exhausted: bool,
}

impl<'a> Search<'a> {
    fn run_tier(&mut self, pool: &[&'a Course], max_size: usize) {
        let mut chosen = Vec::with_capacity(max_size);
        for size in 1..=max_size {
            self.extend(pool, 0, size, 0, &mut chosen);
            // a size class is always finished before the plan cap is checked
            if self.exhausted || self.plans.len() >= self.limits.max_plans {
                break;
            }
        }
    }

    fn extend(
        &mut self,
        pool: &[&'a Course],
        start: usize,
        size: usize,
        credits: u32,
        chosen: &mut Vec<usize>,
    ) {
        if chosen.len() == size {
            if credits == self.target && (self.band.0..=self.band.1).contains(&credits) {
                self.emit(pool, chosen);
            }
            return;
        }

        let still_needed = size - chosen.len();
        for index in start..pool.len() {
            if pool.len() - index < still_needed {
                break;
            }
            let next = credits.saturating_add(pool[index].credits);
            if next > self.target {
                continue;
            }
            if self.budget_spent() {
                return;
            }

            self.explored += 1;
            chosen.push(index);
            self.extend(pool, index + 1, size, next, chosen);
            chosen.pop();

            if self.exhausted {
                return;
            }
        }
    }

    fn budget_spent(&mut self) -> bool {
        if let Some(budget) = self.limits.max_subsets_explored {
            if self.explored >= budget {
                self.exhausted = true;
            }
        }
        self.exhausted
    }

    fn emit(&mut self, pool: &[&'a Course], chosen: &[usize]) {
        let members: Vec<Course> = chosen.iter().map(|&index| pool[index].clone()).collect();

        let mut key: Vec<CourseCode> = members.iter().map(|course| course.code.clone()).collect();
        key.sort();
        if !self.emitted.insert(key) {
            return;
        }

        if let Some(plan) = Plan::new(members, self.completed) {
            self.plans.push(plan);
        }
    }
}
