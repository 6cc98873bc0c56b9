use std::collections::BTreeSet;

use super::super::domain::{Plan, Preference};
use super::config::FitnessWeights;
use super::{FitnessComponent, FitnessTerm};

pub(crate) fn score_plan(
    plan: &Plan,
    preference: Preference,
    target_credits: u32,
    weights: &FitnessWeights,
) -> (Vec<FitnessComponent>, f64) {
    let mut components = Vec::with_capacity(5);
    let mut total = 0.0;

    let prerequisite_score = if plan.all_prerequisites_met() {
        components.push(FitnessComponent {
            term: FitnessTerm::Prerequisites,
            score: weights.prerequisites_met_bonus,
            notes: "all prerequisites met".to_string(),
        });
        weights.prerequisites_met_bonus
    } else {
        let penalty = -weights.violation_penalty * plan.violation_count() as f64;
        components.push(FitnessComponent {
            term: FitnessTerm::Prerequisites,
            score: penalty,
            notes: format!(
                "{} course(s) with unmet prerequisites",
                plan.violation_count()
            ),
        });
        penalty
    };
    total += prerequisite_score;

    let distance = plan.total_credits().abs_diff(target_credits);
    let exactness = -weights.credit_mismatch_penalty * distance as f64;
    components.push(FitnessComponent {
        term: FitnessTerm::CreditExactness,
        score: exactness,
        notes: if distance == 0 {
            format!("exactly {target_credits} credits")
        } else {
            format!(
                "{} credits, {distance} away from target {target_credits}",
                plan.total_credits()
            )
        },
    });
    total += exactness;

    let affinity: u32 = plan
        .courses()
        .iter()
        .map(|course| u32::from(preference.affinity(course.difficulty)))
        .sum();
    components.push(FitnessComponent {
        term: FitnessTerm::DifficultyMatch,
        score: f64::from(affinity),
        notes: format!(
            "{affinity} point(s) for {} preference",
            preference.label()
        ),
    });
    total += f64::from(affinity);

    let tiers: BTreeSet<_> = plan
        .courses()
        .iter()
        .map(|course| course.difficulty)
        .collect();
    let variety = weights.tier_variety_bonus * tiers.len() as f64;
    components.push(FitnessComponent {
        term: FitnessTerm::Balance,
        score: variety,
        notes: format!("{} distinct difficulty tier(s)", tiers.len()),
    });
    total += variety;

    let efficiency =
        weights.efficiency_weight * (weights.efficiency_baseline - plan.len() as f64);
    components.push(FitnessComponent {
        term: FitnessTerm::Efficiency,
        score: efficiency,
        notes: format!("{} course(s)", plan.len()),
    });
    total += efficiency;

    (components, total)
}
