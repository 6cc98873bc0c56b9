mod config;
mod rules;

pub use config::FitnessWeights;

use super::domain::{Plan, Preference};
use serde::{Deserialize, Serialize};

/// Stateless scorer turning a plan into a single comparable fitness value.
#[derive(Debug, Clone, Default)]
pub struct FitnessScorer {
    weights: FitnessWeights,
}

impl FitnessScorer {
    pub fn new(weights: FitnessWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    pub fn score(&self, plan: &Plan, preference: Preference, target_credits: u32) -> f64 {
        self.breakdown(plan, preference, target_credits).total
    }

    pub fn breakdown(
        &self,
        plan: &Plan,
        preference: Preference,
        target_credits: u32,
    ) -> FitnessBreakdown {
        let (components, total) =
            rules::score_plan(plan, preference, target_credits, &self.weights);
        FitnessBreakdown { total, components }
    }
}

/// Terms summed into a plan's fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessTerm {
    Prerequisites,
    CreditExactness,
    DifficultyMatch,
    Balance,
    Efficiency,
}

/// Discrete contribution to a fitness value, kept for transparent explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessComponent {
    pub term: FitnessTerm,
    pub score: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    pub total: f64,
    pub components: Vec<FitnessComponent>,
}

impl FitnessBreakdown {
    pub fn component(&self, term: FitnessTerm) -> Option<&FitnessComponent> {
        self.components
            .iter()
            .find(|component| component.term == term)
    }
}
