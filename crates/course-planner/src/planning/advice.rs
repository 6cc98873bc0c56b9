use std::io::Read;

use serde::{Deserialize, Serialize};

use super::domain::{Difficulty, Plan};

/// Threshold table consulted by the advice engine.
///
/// Loaded once (defaults or a JSON document) and handed to [`AdviceEngine::new`];
/// the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceRules {
    pub heavy_load_credits: u32,
    pub high_risk_cgpa: f64,
    pub moderate_risk_cgpa: f64,
    pub max_challenging_courses: usize,
    pub struggling_cgpa: f64,
    pub struggling_challenging_limit: usize,
    pub reduce_above_credits: u32,
    pub limit_challenging_cgpa: f64,
    pub limit_challenging_count: usize,
    pub strong_cgpa: f64,
    pub light_load_credits: u32,
    pub safe_cgpa: f64,
    pub acceptable_cgpa: f64,
}

impl Default for AdviceRules {
    fn default() -> Self {
        Self {
            heavy_load_credits: 18,
            high_risk_cgpa: 2.0,
            moderate_risk_cgpa: 3.0,
            max_challenging_courses: 4,
            struggling_cgpa: 2.5,
            struggling_challenging_limit: 3,
            reduce_above_credits: 15,
            limit_challenging_cgpa: 3.0,
            limit_challenging_count: 3,
            strong_cgpa: 3.5,
            light_load_credits: 15,
            safe_cgpa: 3.0,
            acceptable_cgpa: 2.5,
        }
    }
}

impl AdviceRules {
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }
}

/// Counts backing the advice, echoed to the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceStats {
    pub total_credits: u32,
    pub easy_courses: usize,
    pub balanced_courses: usize,
    pub challenging_courses: usize,
    pub cgpa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAdvice {
    pub warnings: Vec<String>,
    pub advice: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub stats: AdviceStats,
}

/// Rule-based academic advisor keyed on CGPA, credit load, and difficulty mix.
#[derive(Debug, Clone, Default)]
pub struct AdviceEngine {
    rules: AdviceRules,
}

impl AdviceEngine {
    pub fn new(rules: AdviceRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &AdviceRules {
        &self.rules
    }

    pub fn advise(&self, cgpa: f64, plan: &Plan) -> PlanAdvice {
        let rules = &self.rules;
        let credits = plan.total_credits();
        let challenging = plan.count_by_difficulty(Difficulty::Challenging);

        let mut warnings = Vec::new();
        let mut advice = Vec::new();

        let heavy_load = credits >= rules.heavy_load_credits;
        if heavy_load && cgpa < rules.high_risk_cgpa {
            warnings.push("HIGH RISK: low CGPA with a heavy credit load".to_string());
            advice.push("Consider reducing to 12-15 credits".to_string());
        } else if heavy_load && cgpa < rules.moderate_risk_cgpa {
            warnings.push("MODERATE RISK: CGPA below 3.0 with a heavy credit load".to_string());
            advice.push("Monitor workload carefully".to_string());
        }

        if challenging > rules.max_challenging_courses
            || (cgpa < rules.struggling_cgpa && challenging >= rules.struggling_challenging_limit)
        {
            warnings.push("TOO MANY CHALLENGING COURSES".to_string());
            advice.push(format!(
                "Limit challenging courses to 3-4 (currently {challenging})"
            ));
        }

        if warnings.is_empty() {
            if cgpa < rules.struggling_cgpa && credits > rules.reduce_above_credits {
                advice.push(format!(
                    "Recommend reducing to 12-15 credits given CGPA {cgpa:.2}"
                ));
            }
            if cgpa < rules.limit_challenging_cgpa && challenging >= rules.limit_challenging_count
            {
                advice.push(format!(
                    "Consider limiting challenging courses (currently {challenging})"
                ));
            }
        }

        if cgpa >= rules.strong_cgpa && credits <= rules.light_load_credits {
            advice.push("Good CGPA: you can handle more credits if desired".to_string());
        }

        let status = if !warnings.is_empty() {
            None
        } else if cgpa >= rules.safe_cgpa {
            Some("SAFE: academic plan is appropriate".to_string())
        } else if cgpa >= rules.acceptable_cgpa {
            Some("ACCEPTABLE: plan is manageable".to_string())
        } else {
            None
        };

        PlanAdvice {
            warnings,
            advice,
            status,
            stats: AdviceStats {
                total_credits: credits,
                easy_courses: plan.count_by_difficulty(Difficulty::Easy),
                balanced_courses: plan.count_by_difficulty(Difficulty::Balanced),
                challenging_courses: challenging,
                cgpa,
            },
        }
    }
}
