use super::common::*;
use crate::planning::domain::{CompletedSet, Difficulty, Plan, Preference};
use crate::planning::scoring::{FitnessScorer, FitnessTerm, FitnessWeights};

#[test]
fn easy_preference_on_mixed_plan_scores_three_affinity_points() {
    let plan = plan_of(vec![
        course("E1", 4, Difficulty::Easy),
        course("C1", 4, Difficulty::Challenging),
    ]);

    let breakdown = FitnessScorer::default().breakdown(&plan, Preference::Easy, 8);

    let affinity = breakdown
        .component(FitnessTerm::DifficultyMatch)
        .expect("difficulty term present");
    assert_eq!(affinity.score, 3.0);
    // 100 met + 0 exact + 3 affinity + 2 * 2 tiers + 0.5 * (20 - 2)
    assert_eq!(breakdown.total, 116.0);
}

#[test]
fn violations_and_credit_distance_are_penalized() {
    let completed = CompletedSet::new();
    let plan = Plan::new(
        vec![
            course_requiring("A1", 3, Difficulty::Balanced, "Z1"),
            course_requiring("A2", 3, Difficulty::Balanced, "Z2"),
        ],
        &completed,
    )
    .expect("distinct codes");

    let breakdown = FitnessScorer::default().breakdown(&plan, Preference::Balanced, 7);

    let prerequisites = breakdown
        .component(FitnessTerm::Prerequisites)
        .expect("prerequisite term");
    assert_eq!(prerequisites.score, -100.0);
    let exactness = breakdown
        .component(FitnessTerm::CreditExactness)
        .expect("exactness term");
    assert_eq!(exactness.score, -1000.0);
    let balance = breakdown.component(FitnessTerm::Balance).expect("balance");
    assert_eq!(balance.score, 2.0);
    // -100 - 1000 + 6 + 2 + 9
    assert_eq!(breakdown.total, -1083.0);
}

#[test]
fn efficiency_turns_negative_past_the_baseline() {
    let courses: Vec<_> = (0..22)
        .map(|i| course(&format!("S{i:02}"), 1, Difficulty::Easy))
        .collect();
    let plan = plan_of(courses);

    let breakdown = FitnessScorer::default().breakdown(&plan, Preference::Challenging, 22);

    let efficiency = breakdown
        .component(FitnessTerm::Efficiency)
        .expect("efficiency term");
    assert_eq!(efficiency.score, -1.0);
    assert_eq!(
        breakdown
            .component(FitnessTerm::DifficultyMatch)
            .map(|c| c.score),
        Some(0.0)
    );
}

#[test]
fn score_matches_breakdown_total_and_respects_weights() {
    let plan = plan_of(scenario_courses());
    let scorer = FitnessScorer::new(FitnessWeights {
        prerequisites_met_bonus: 10.0,
        ..FitnessWeights::default()
    });

    let score = scorer.score(&plan, Preference::Balanced, 11);

    assert_eq!(score, scorer.breakdown(&plan, Preference::Balanced, 11).total);
    // 10 met + 7 affinity + 6 variety + 8.5 efficiency
    assert_eq!(score, 31.5);
}

#[test]
fn scoring_is_pure() {
    let plan = plan_of(scenario_courses());
    let scorer = FitnessScorer::default();

    let first = scorer.score(&plan, Preference::Easy, 11);
    let second = scorer.score(&plan, Preference::Easy, 11);

    assert_eq!(first.to_bits(), second.to_bits());
}
