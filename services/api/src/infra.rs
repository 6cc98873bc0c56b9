use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use course_planner::error::AppError;
use course_planner::planning::{
    CatalogError, CatalogImporter, Course, CourseCode, Difficulty, InMemoryCourseCatalog,
    PlanningServiceError, Prerequisites,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

const SEMESTERS: u8 = 8;
const COURSES_PER_DISCIPLINE: usize = 60;
const COURSES_PER_SEMESTER: usize = 11;
const UNIQUE_PER_SEMESTER: usize = 7;
const COURSE_CREDITS: u32 = 3;

struct Discipline {
    department: &'static str,
    prefix: &'static str,
    programs: &'static [&'static str],
    topics: [&'static str; 10],
}

const DISCIPLINES: [Discipline; 6] = [
    Discipline {
        department: "Computer Science",
        prefix: "CS",
        programs: &["CS-AI", "CS-DS", "CS-Cybersecurity", "CS-Blockchain", "CS-HCI"],
        topics: [
            "Programming",
            "Data Structures",
            "Algorithms",
            "OOP",
            "Databases",
            "Web Dev",
            "Networks",
            "OS",
            "Software Engineering",
            "AI",
        ],
    },
    Discipline {
        department: "Electrical Engineering",
        prefix: "EE",
        programs: &[
            "EE-Power",
            "EE-Electronics",
            "EE-Telecommunications",
            "EE-Renewable",
        ],
        topics: [
            "Circuits",
            "Electronics",
            "Signals",
            "Electromagnetics",
            "Control Systems",
            "Power Systems",
            "Microprocessors",
            "Communications",
            "RF Engineering",
            "Embedded Systems",
        ],
    },
    Discipline {
        department: "Mechanical Engineering",
        prefix: "ME",
        programs: &[
            "ME-Thermal",
            "ME-Mechanical Design",
            "ME-Robotics",
            "ME-Manufacturing",
        ],
        topics: [
            "Thermodynamics",
            "Fluid Mechanics",
            "Materials",
            "Machine Design",
            "Heat Transfer",
            "Manufacturing",
            "Robotics",
            "CAD",
            "Aerodynamics",
            "Vibration",
        ],
    },
    Discipline {
        department: "Civil Engineering",
        prefix: "CE",
        programs: &[
            "CE-Structural",
            "CE-Transportation",
            "CE-Water Resources",
            "CE-Environmental",
        ],
        topics: [
            "Mechanics",
            "Concrete Design",
            "Structural Analysis",
            "Foundation",
            "Transportation",
            "Surveying",
            "Construction",
            "Water Resources",
            "Steel Design",
            "Environmental",
        ],
    },
    Discipline {
        department: "Business Administration",
        prefix: "BBA",
        programs: &[
            "BBA-Finance",
            "BBA-Marketing",
            "BBA-HR",
            "BBA-Entrepreneurship",
            "BBA-International Business",
        ],
        topics: [
            "Accounting",
            "Finance",
            "Management",
            "Marketing",
            "HR",
            "Operations",
            "Economics",
            "Business Law",
            "Entrepreneurship",
            "Digital Marketing",
        ],
    },
    Discipline {
        department: "Software Engineering",
        prefix: "SE",
        programs: &["SE-Web Dev", "SE-Mobile Dev", "SE-Cloud Systems", "SE-AI/ML"],
        topics: [
            "Design Patterns",
            "Testing",
            "Agile",
            "DevOps",
            "Architecture",
            "Code Quality",
            "Requirements",
            "Database Systems",
            "Security",
            "Microservices",
        ],
    },
];

/// Load the catalog from a CSV export, or fall back to the seeded demo catalog.
pub(crate) fn load_catalog(csv: Option<&Path>) -> Result<InMemoryCourseCatalog, AppError> {
    match csv {
        Some(path) => {
            let catalog = CatalogImporter::from_path(path)?;
            info!(
                path = %path.display(),
                programs = catalog.program_count(),
                offerings = catalog.offering_count(),
                "loaded catalog from CSV"
            );
            Ok(catalog)
        }
        None => seeded_catalog()
            .map_err(|err| AppError::Planning(PlanningServiceError::from(err))),
    }
}

/// Demonstration catalog: six departments, 26 programs, eleven three-credit
/// courses per program semester.
pub(crate) fn seeded_catalog() -> Result<InMemoryCourseCatalog, CatalogError> {
    let mut catalog = InMemoryCourseCatalog::new();
    let mut program_number = 0usize;

    for discipline in &DISCIPLINES {
        let department_id = catalog.add_department(discipline.department);
        let courses = discipline_courses(discipline);
        let gateway = CourseCode::new(format!("{}001", discipline.prefix));

        for name in discipline.programs {
            program_number += 1;
            let program_id = catalog.add_program(department_id, *name)?;

            for (semester, members) in semester_layout(program_number).into_iter().enumerate() {
                let semester = semester as u8 + 1;
                for index in members {
                    let mut course = courses[index].clone();
                    // later semesters build on the discipline's gateway course
                    if semester > 1 && course.code != gateway {
                        course.prerequisites = Prerequisites::from_codes([gateway.as_str()]);
                    }
                    catalog.offer(program_id, semester, course)?;
                }
            }
        }
    }

    Ok(catalog)
}

fn discipline_courses(discipline: &Discipline) -> Vec<Course> {
    (0..COURSES_PER_DISCIPLINE)
        .map(|index| {
            let topic = discipline.topics[index % discipline.topics.len()];
            let variant = index / discipline.topics.len() + 1;
            let name = if variant > 1 {
                format!("{topic} {variant}")
            } else {
                topic.to_string()
            };
            Course {
                code: CourseCode::new(format!("{}{:03}", discipline.prefix, index + 1)),
                description: format!("{name} course content"),
                name,
                credits: COURSE_CREDITS,
                difficulty: Difficulty::ALL[index % Difficulty::ALL.len()],
                prerequisites: Prerequisites::none(),
            }
        })
        .collect()
}

/// Course indexes per semester: seven courses no other semester claims as its
/// own, then shared courses in catalog order up to eleven.
fn semester_layout(program_number: usize) -> Vec<BTreeSet<usize>> {
    let mut semesters = claim_own_courses(program_number);
    for members in &mut semesters {
        for index in 0..COURSES_PER_DISCIPLINE {
            if members.len() >= COURSES_PER_SEMESTER {
                break;
            }
            members.insert(index);
        }
    }
    semesters
}

fn claim_own_courses(program_number: usize) -> Vec<BTreeSet<usize>> {
    let mut claimed = BTreeSet::new();
    let mut cursor = (program_number * 13) % COURSES_PER_DISCIPLINE;
    let mut semesters = Vec::with_capacity(usize::from(SEMESTERS));

    for _ in 0..SEMESTERS {
        let mut members = BTreeSet::new();
        let mut attempts = 0;
        while members.len() < UNIQUE_PER_SEMESTER && attempts < COURSES_PER_DISCIPLINE {
            let index = cursor % COURSES_PER_DISCIPLINE;
            if claimed.insert(index) {
                members.insert(index);
            }
            cursor += 1;
            attempts += 1;
        }
        semesters.push(members);
    }

    semesters
}
