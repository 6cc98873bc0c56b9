//! Property-based tests for the plan search and ranking invariants.
//!
//! These tests verify that:
//! - every enumerated plan hits the target exactly with distinct members
//! - violation counts agree with the completed set
//! - ranking is monotonic, bounded, and idempotent

use std::collections::BTreeSet;

use course_planner::planning::{
    CompletedSet, Course, CourseCode, Difficulty, PlanEnumerator, PlanRanker, Preference,
    Prerequisites, SearchLimits,
};
use proptest::prelude::*;

fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Balanced),
        Just(Difficulty::Challenging),
    ]
}

fn arb_preference() -> impl Strategy<Value = Preference> {
    prop_oneof![
        Just(Preference::Easy),
        Just(Preference::Balanced),
        Just(Preference::Challenging),
    ]
}

/// Up to nine courses with 1-5 credits; some require an earlier course.
fn arb_courses() -> impl Strategy<Value = Vec<Course>> {
    prop::collection::vec((1u32..=5, arb_difficulty(), prop::option::of(0usize..9)), 1..9)
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(index, (credits, difficulty, requires))| {
                    let prerequisites = match requires {
                        Some(other) if other != index => {
                            Prerequisites::from_codes([format!("K{other}")])
                        }
                        _ => Prerequisites::none(),
                    };
                    Course {
                        code: CourseCode::new(format!("K{index}")),
                        name: format!("Course {index}"),
                        description: String::new(),
                        credits,
                        difficulty,
                        prerequisites,
                    }
                })
                .collect()
        })
}

fn arb_completed() -> impl Strategy<Value = CompletedSet> {
    prop::collection::btree_set(0usize..9, 0..4)
        .prop_map(|indexes| indexes.into_iter().map(|i| format!("K{i}")).collect())
}

fn limits() -> SearchLimits {
    SearchLimits {
        max_subsets_explored: Some(50_000),
        ..SearchLimits::default()
    }
}

proptest! {
    #[test]
    fn enumerated_plans_are_exact_and_consistent(
        courses in arb_courses(),
        completed in arb_completed(),
        target in 1u32..=15,
    ) {
        let plans = PlanEnumerator::new(limits()).enumerate(&courses, target, 1, 24, &completed);

        for plan in &plans {
            let sum: u32 = plan.courses().iter().map(|c| c.credits).sum();
            prop_assert_eq!(sum, target);
            prop_assert_eq!(plan.total_credits(), target);

            let codes: BTreeSet<_> = plan.codes().into_iter().collect();
            prop_assert_eq!(codes.len(), plan.len());

            let unmet = plan
                .courses()
                .iter()
                .filter(|c| c.prerequisites.codes().iter().any(|p| !completed.contains(p)))
                .count();
            prop_assert_eq!(plan.violation_count(), unmet);
            prop_assert_eq!(plan.all_prerequisites_met(), unmet == 0);
        }

        let keys: Vec<_> = plans
            .iter()
            .map(|plan| (!plan.all_prerequisites_met(), plan.violation_count()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn ranking_is_monotonic_bounded_and_idempotent(
        courses in arb_courses(),
        completed in arb_completed(),
        target in 1u32..=15,
        preference in arb_preference(),
        limit in 1usize..=8,
    ) {
        let plans = PlanEnumerator::new(limits()).enumerate(&courses, target, 1, 24, &completed);
        let ranker = PlanRanker::default();

        let first = ranker.rank_scored(plans.clone(), preference, target, limit);
        let second = ranker.rank_scored(plans.clone(), preference, target, limit);

        prop_assert!(first.len() <= limit);
        prop_assert_eq!(first.len(), plans.len().min(limit));
        prop_assert!(first.windows(2).all(|pair| pair[0].fitness >= pair[1].fitness));
        prop_assert_eq!(first, second);
    }
}
