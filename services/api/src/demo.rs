use crate::infra::load_catalog;
use clap::Args;
use course_planner::config::AppConfig;
use course_planner::error::AppError;
use course_planner::planning::{
    CourseCatalog, InMemoryCourseCatalog, PlanRequest, PlanView, PlanningResponse,
    PlanningService, PlanningServiceError,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Program identifier (see `catalog`)
    #[arg(long, default_value_t = 1)]
    pub(crate) program: u32,
    /// Semester to plan, 1-8
    #[arg(long)]
    pub(crate) semester: i64,
    /// Exact credit total the plan must reach
    #[arg(long)]
    pub(crate) credits: i64,
    /// Difficulty preference: easy, balanced, or challenging
    #[arg(long)]
    pub(crate) preference: Option<String>,
    /// Current CGPA on a 4.0 scale (defaults to 3.0)
    #[arg(long)]
    pub(crate) cgpa: Option<f64>,
    /// Completed course codes; defaults to every course of earlier semesters
    #[arg(long, value_delimiter = ',')]
    pub(crate) completed: Option<Vec<String>>,
    /// Leave completed courses out of the candidates
    #[arg(long)]
    pub(crate) exclude_completed: bool,
    /// Number of plans to return
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Read the catalog from a CSV export instead of the seeded demo catalog
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
    /// Print the raw JSON response instead of the formatted report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Read the catalog from a CSV export instead of the seeded demo catalog
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        program,
        semester,
        credits,
        preference,
        cgpa,
        completed,
        exclude_completed,
        limit,
        catalog_csv,
        json,
    } = args;

    let service = planning_service(load_catalog(catalog_csv.as_deref())?)?;
    let response = service.plan(PlanRequest {
        program_id: program,
        semester,
        target_credits: credits,
        preference,
        cgpa,
        completed_courses: completed,
        exclude_completed,
        limit,
    })?;

    if json {
        match serde_json::to_string_pretty(&response) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Response payload unavailable: {err}"),
        }
    } else {
        render_response(&response);
    }
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog_csv.as_deref())?;
    let departments = catalog.departments().map_err(PlanningServiceError::from)?;

    println!("Course catalog ({} programs)", catalog.program_count());
    for department in departments {
        println!("- [{}] {}", department.id, department.name);
        let programs = catalog
            .programs(department.id)
            .map_err(PlanningServiceError::from)?;
        for program in programs {
            println!("    - [{}] {}", program.id, program.name);
        }
    }
    Ok(())
}

struct DemoScenario {
    title: &'static str,
    program: &'static str,
    semester: i64,
    credits: i64,
    preference: &'static str,
    cgpa: f64,
}

const DEMO_SCENARIOS: [DemoScenario; 4] = [
    DemoScenario {
        title: "First-semester AI student, balanced load",
        program: "CS-AI",
        semester: 1,
        credits: 15,
        preference: "balanced",
        cgpa: 3.2,
    },
    DemoScenario {
        title: "Struggling finance student asking for a heavy load",
        program: "BBA-Finance",
        semester: 3,
        credits: 18,
        preference: "challenging",
        cgpa: 1.9,
    },
    DemoScenario {
        title: "Strong robotics student keeping it light",
        program: "ME-Robotics",
        semester: 2,
        credits: 12,
        preference: "easy",
        cgpa: 3.8,
    },
    DemoScenario {
        title: "Credit total no combination can reach",
        program: "SE-Web Dev",
        semester: 4,
        credits: 13,
        preference: "balanced",
        cgpa: 3.0,
    },
];

pub(crate) fn run_demo() -> Result<(), AppError> {
    let catalog = load_catalog(None)?;
    let program_ids: Vec<Option<u32>> = DEMO_SCENARIOS
        .iter()
        .map(|scenario| catalog.program_id(scenario.program))
        .collect();
    let service = planning_service(catalog)?;

    println!("Semester course planner demo");
    for (scenario, program_id) in DEMO_SCENARIOS.iter().zip(program_ids) {
        println!(
            "\n== {} ({}, semester {}, {} credits, CGPA {:.2}) ==",
            scenario.title, scenario.program, scenario.semester, scenario.credits, scenario.cgpa
        );
        let Some(program_id) = program_id else {
            println!("  Program {} missing from the catalog", scenario.program);
            continue;
        };

        let request = PlanRequest {
            program_id,
            semester: scenario.semester,
            target_credits: scenario.credits,
            preference: Some(scenario.preference.to_string()),
            cgpa: Some(scenario.cgpa),
            completed_courses: None,
            exclude_completed: false,
            limit: Some(2),
        };
        match service.plan(request) {
            Ok(response) => render_response(&response),
            Err(err) => println!("  Planning unavailable: {err}"),
        }
    }

    Ok(())
}

fn planning_service(
    catalog: InMemoryCourseCatalog,
) -> Result<PlanningService<InMemoryCourseCatalog>, AppError> {
    let config = AppConfig::load()?;
    Ok(PlanningService::new(Arc::new(catalog), config.planner))
}

fn render_response(response: &PlanningResponse) {
    println!(
        "Semester {} | target {} credits | preference {} | CGPA {:.2} | {} completed course(s)",
        response.semester,
        response.target_credits,
        response.preference.label(),
        response.cgpa,
        response.completed_courses
    );
    println!(
        "Search: {} preferred course(s), {} preferred plan(s), {} fallback plan(s){}",
        response.search.preferred_courses,
        response.search.preferred_plans,
        response.search.fallback_plans,
        if response.search.budget_exhausted {
            " (search budget exhausted)"
        } else {
            ""
        }
    );

    for plan in &response.plans {
        render_plan(plan);
    }
}

fn render_plan(plan: &PlanView) {
    let prerequisites = if plan.all_prereqs_met {
        "all prerequisites met".to_string()
    } else {
        format!("{} prerequisite violation(s)", plan.constraint_violations)
    };
    println!(
        "\nPlan #{}: {} credits across {} course(s) | fitness {:.1} | {}",
        plan.rank, plan.total_credits, plan.course_count, plan.fitness, prerequisites
    );

    for course in &plan.courses {
        let mut line = format!(
            "  - {} {} ({} cr, {})",
            course.code,
            course.name,
            course.credits,
            course.difficulty.label()
        );
        if !course.missing_prerequisites.is_empty() {
            let missing: Vec<&str> = course
                .missing_prerequisites
                .iter()
                .map(|code| code.as_str())
                .collect();
            line.push_str(&format!(" [missing {}]", missing.join(", ")));
        }
        println!("{line}");
    }

    println!("  Fitness breakdown:");
    for component in &plan.fitness_breakdown {
        println!(
            "    - {:?}: {:.1} ({})",
            component.term, component.score, component.notes
        );
    }

    let advice = &plan.expert_advice;
    for warning in &advice.warnings {
        println!("  ! {warning}");
    }
    for item in &advice.advice {
        println!("  * {item}");
    }
    if let Some(status) = &advice.status {
        println!("  Status: {status}");
    }
}
