use serde::{Deserialize, Serialize};

/// Weights applied to each fitness term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    pub prerequisites_met_bonus: f64,
    pub violation_penalty: f64,
    pub credit_mismatch_penalty: f64,
    pub tier_variety_bonus: f64,
    pub efficiency_weight: f64,
    pub efficiency_baseline: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            prerequisites_met_bonus: 100.0,
            violation_penalty: 50.0,
            credit_mismatch_penalty: 1000.0,
            tier_variety_bonus: 2.0,
            efficiency_weight: 0.5,
            efficiency_baseline: 20.0,
        }
    }
}
