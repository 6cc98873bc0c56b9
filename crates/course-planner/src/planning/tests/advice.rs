use super::common::*;
use crate::planning::advice::{AdviceEngine, AdviceRules};
use crate::planning::domain::{Difficulty, Plan};

fn plan_with(easy: usize, balanced: usize, challenging: usize) -> Plan {
    let mut courses = Vec::new();
    for i in 0..easy {
        courses.push(course(&format!("E{i}"), 3, Difficulty::Easy));
    }
    for i in 0..balanced {
        courses.push(course(&format!("B{i}"), 3, Difficulty::Balanced));
    }
    for i in 0..challenging {
        courses.push(course(&format!("C{i}"), 3, Difficulty::Challenging));
    }
    plan_of(courses)
}

#[test]
fn low_cgpa_with_heavy_load_is_high_risk() {
    let advice = AdviceEngine::default().advise(1.8, &plan_with(3, 3, 0));

    assert_eq!(advice.stats.total_credits, 18);
    assert!(advice.warnings.iter().any(|w| w.starts_with("HIGH RISK")));
    assert!(advice.advice.iter().any(|a| a.contains("12-15 credits")));
    assert!(advice.status.is_none());
}

#[test]
fn mid_cgpa_with_heavy_load_is_moderate_risk() {
    let advice = AdviceEngine::default().advise(2.6, &plan_with(2, 4, 0));

    assert_eq!(advice.warnings.len(), 1);
    assert!(advice.warnings[0].starts_with("MODERATE RISK"));
    assert_eq!(advice.advice, vec!["Monitor workload carefully".to_string()]);
}

#[test]
fn too_many_challenging_courses_is_flagged() {
    let advice = AdviceEngine::default().advise(3.4, &plan_with(0, 0, 5));

    assert!(advice
        .warnings
        .iter()
        .any(|w| w == "TOO MANY CHALLENGING COURSES"));
    assert!(advice.advice.iter().any(|a| a.contains("currently 5")));
    assert_eq!(advice.stats.challenging_courses, 5);
}

#[test]
fn struggling_student_gets_recommendations_without_warnings() {
    // 16 credits and 2 challenging courses stay under every warning threshold
    let mut courses = vec![course("L1", 1, Difficulty::Easy)];
    for i in 0..3 {
        courses.push(course(&format!("B{i}"), 3, Difficulty::Balanced));
    }
    for i in 0..2 {
        courses.push(course(&format!("C{i}"), 3, Difficulty::Challenging));
    }
    let plan = plan_of(courses);

    let advice = AdviceEngine::default().advise(2.2, &plan);

    assert!(advice.warnings.is_empty());
    assert_eq!(advice.advice.len(), 1);
    assert!(advice.advice[0].starts_with("Recommend reducing"));
    assert!(advice.status.is_none());
}

#[test]
fn strong_student_with_light_load_is_safe() {
    let advice = AdviceEngine::default().advise(3.7, &plan_with(2, 2, 0));

    assert!(advice.warnings.is_empty());
    assert!(advice.advice.iter().any(|a| a.starts_with("Good CGPA")));
    assert_eq!(
        advice.status.as_deref(),
        Some("SAFE: academic plan is appropriate")
    );
}

#[test]
fn acceptable_band_limits_challenging_courses() {
    let advice = AdviceEngine::default().advise(2.7, &plan_with(1, 0, 3));

    assert!(advice.warnings.is_empty());
    assert!(advice
        .advice
        .iter()
        .any(|a| a.starts_with("Consider limiting challenging courses")));
    assert_eq!(
        advice.status.as_deref(),
        Some("ACCEPTABLE: plan is manageable")
    );
}

#[test]
fn rules_load_from_partial_json() {
    let rules = AdviceRules::from_json_reader(r#"{ "heavy_load_credits": 21 }"#.as_bytes())
        .expect("rules parse");

    assert_eq!(rules.heavy_load_credits, 21);
    assert_eq!(rules.high_risk_cgpa, AdviceRules::default().high_risk_cgpa);

    let advice = AdviceEngine::new(rules).advise(1.8, &plan_with(3, 3, 0));
    assert!(advice.warnings.is_empty());
}
