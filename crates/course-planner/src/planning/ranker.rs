use super::domain::{Plan, Preference, ScoredPlan};
use super::scoring::FitnessScorer;

pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Orders plans by fitness and keeps the best `limit`.
#[derive(Debug, Clone, Default)]
pub struct PlanRanker {
    scorer: FitnessScorer,
}

impl PlanRanker {
    pub fn new(scorer: FitnessScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &FitnessScorer {
        &self.scorer
    }

    pub fn rank(
        &self,
        plans: Vec<Plan>,
        preference: Preference,
        target_credits: u32,
        limit: usize,
    ) -> Vec<Plan> {
        self.rank_scored(plans, preference, target_credits, limit)
            .into_iter()
            .map(|scored| scored.plan)
            .collect()
    }

    /// Highest fitness first; equal fitness keeps the incoming order.
    pub fn rank_scored(
        &self,
        plans: Vec<Plan>,
        preference: Preference,
        target_credits: u32,
        limit: usize,
    ) -> Vec<ScoredPlan> {
        let mut scored: Vec<ScoredPlan> = plans
            .into_iter()
            .map(|plan| {
                let fitness = self.scorer.score(&plan, preference, target_credits);
                ScoredPlan { plan, fitness }
            })
            .collect();

        scored.sort_by(|left, right| right.fitness.total_cmp(&left.fitness));
        scored.truncate(limit);
        scored
    }
}
