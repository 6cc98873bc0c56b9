use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::PlannerConfig;
use crate::planning::catalog::InMemoryCourseCatalog;
use crate::planning::domain::{CompletedSet, Course, CourseCode, Difficulty, Plan, Prerequisites};
use crate::planning::service::PlanningService;
use crate::planning::validation::PlanRequest;

pub(super) fn course(code: &str, credits: u32, difficulty: Difficulty) -> Course {
    Course {
        code: CourseCode::new(code),
        name: format!("{code} course"),
        description: String::new(),
        credits,
        difficulty,
        prerequisites: Prerequisites::none(),
    }
}

pub(super) fn course_requiring(
    code: &str,
    credits: u32,
    difficulty: Difficulty,
    prerequisites: &str,
) -> Course {
    Course {
        prerequisites: Prerequisites::parse(Some(prerequisites)),
        ..course(code, credits, difficulty)
    }
}

/// X1(4, Easy), X2(3, Balanced), X3(4, Challenging).
pub(super) fn scenario_courses() -> Vec<Course> {
    vec![
        course("X1", 4, Difficulty::Easy),
        course("X2", 3, Difficulty::Balanced),
        course("X3", 4, Difficulty::Challenging),
    ]
}

/// Scenario courses plus X4(3, Balanced) which requires X1.
pub(super) fn scenario_courses_with_dependent() -> Vec<Course> {
    let mut courses = scenario_courses();
    courses.push(course_requiring("X4", 3, Difficulty::Balanced, "X1"));
    courses
}

pub(super) fn plan_of(courses: Vec<Course>) -> Plan {
    Plan::new(courses, &CompletedSet::new()).expect("distinct codes")
}

pub(super) fn sorted_codes(plan: &Plan) -> Vec<String> {
    let mut codes: Vec<String> = plan
        .codes()
        .into_iter()
        .map(|code| code.as_str().to_string())
        .collect();
    codes.sort();
    codes
}

/// One department with a single program across two semesters.
///
/// Semester 1 offers five 3-credit courses without prerequisites. Semester 2
/// offers CS010 (needs CS001), CS011, CS012 (4 credits, needs CS099 which is
/// never offered), CS013, and CS014 (2 credits).
pub(super) fn sample_catalog() -> InMemoryCourseCatalog {
    let mut catalog = InMemoryCourseCatalog::new();
    let department = catalog.add_department("Computer Science");
    let program = catalog
        .add_program(department, "CS-AI")
        .expect("department exists");
    catalog.add_department("Mathematics");

    let first = [
        course("CS001", 3, Difficulty::Easy),
        course("CS002", 3, Difficulty::Balanced),
        course("CS003", 3, Difficulty::Challenging),
        course("CS004", 3, Difficulty::Easy),
        course("CS005", 3, Difficulty::Balanced),
    ];
    let second = [
        course_requiring("CS010", 3, Difficulty::Balanced, "CS001"),
        course("CS011", 3, Difficulty::Easy),
        course_requiring("CS012", 4, Difficulty::Challenging, "CS099"),
        course("CS013", 3, Difficulty::Challenging),
        course("CS014", 2, Difficulty::Easy),
    ];

    for course in first {
        catalog.offer(program, 1, course).expect("offer semester 1");
    }
    for course in second {
        catalog.offer(program, 2, course).expect("offer semester 2");
    }
    catalog
}

pub(super) fn build_service() -> PlanningService<InMemoryCourseCatalog> {
    PlanningService::new(Arc::new(sample_catalog()), PlannerConfig::default())
}

pub(super) fn plan_request(semester: i64, target_credits: i64) -> PlanRequest {
    PlanRequest {
        program_id: 1,
        semester,
        target_credits,
        preference: Some("balanced".to_string()),
        cgpa: Some(3.2),
        completed_courses: None,
        exclude_completed: false,
        limit: None,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
