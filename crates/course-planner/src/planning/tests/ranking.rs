use super::common::*;
use crate::planning::domain::{Difficulty, Plan, Preference};
use crate::planning::ranker::{PlanRanker, DEFAULT_RESULT_LIMIT};
use crate::planning::scoring::FitnessScorer;

fn twelve_plans() -> Vec<Plan> {
    (0..12)
        .map(|i| {
            let members = (0..=(i % 4))
                .map(|j| {
                    let difficulty = Difficulty::ALL[(i + j) % 3];
                    course(&format!("R{i:02}{j}"), 3, difficulty)
                })
                .collect();
            plan_of(members)
        })
        .collect()
}

#[test]
fn top_five_matches_a_full_sort() {
    let plans = twelve_plans();
    let scorer = FitnessScorer::default();
    let ranker = PlanRanker::new(scorer.clone());

    let ranked = ranker.rank(plans.clone(), Preference::Easy, 9, DEFAULT_RESULT_LIMIT);

    let mut naive: Vec<(f64, Plan)> = plans
        .into_iter()
        .map(|plan| (scorer.score(&plan, Preference::Easy, 9), plan))
        .collect();
    naive.sort_by(|left, right| right.0.total_cmp(&left.0));
    let expected: Vec<Plan> = naive.into_iter().take(5).map(|(_, plan)| plan).collect();

    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked, expected);
}

#[test]
fn scored_results_are_monotonic_and_bounded() {
    let ranked =
        PlanRanker::default().rank_scored(twelve_plans(), Preference::Challenging, 6, 7);

    assert_eq!(ranked.len(), 7);
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].fitness >= pair[1].fitness));
}

#[test]
fn ties_keep_enumeration_order() {
    let first = plan_of(vec![course("T1", 3, Difficulty::Easy)]);
    let second = plan_of(vec![course("T2", 3, Difficulty::Easy)]);
    let third = plan_of(vec![course("T3", 3, Difficulty::Easy)]);

    let ranked = PlanRanker::default().rank(
        vec![first.clone(), second.clone(), third.clone()],
        Preference::Balanced,
        3,
        2,
    );

    assert_eq!(ranked, vec![first, second]);
}

#[test]
fn empty_input_returns_empty_output() {
    let ranked = PlanRanker::default().rank(Vec::new(), Preference::Easy, 12, 5);
    assert!(ranked.is_empty());
}

#[test]
fn limit_larger_than_input_returns_everything() {
    let ranked = PlanRanker::default().rank(twelve_plans(), Preference::Balanced, 3, 50);
    assert_eq!(ranked.len(), 12);
}
