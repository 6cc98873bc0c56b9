use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::error;

use super::catalog::CourseCatalog;
use super::service::{PlanningService, PlanningServiceError};
use super::validation::PlanRequest;

/// Router builder exposing catalog lookups and plan generation.
pub fn planning_router<C>(service: Arc<PlanningService<C>>) -> Router
where
    C: CourseCatalog + 'static,
{
    Router::new()
        .route("/api/v1/departments", get(departments_handler::<C>))
        .route(
            "/api/v1/programs/:department_id",
            get(programs_handler::<C>),
        )
        .route("/api/v1/plan", post(plan_handler::<C>))
        .with_state(service)
}

pub(crate) async fn departments_handler<C>(
    State(service): State<Arc<PlanningService<C>>>,
) -> Response
where
    C: CourseCatalog + 'static,
{
    match service.departments() {
        Ok(departments) => {
            let payload = json!({ "departments": departments });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn programs_handler<C>(
    State(service): State<Arc<PlanningService<C>>>,
    Path(department_id): Path<u32>,
) -> Response
where
    C: CourseCatalog + 'static,
{
    match service.programs(department_id) {
        Ok(programs) => {
            let payload = json!({ "programs": programs });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn plan_handler<C>(
    State(service): State<Arc<PlanningService<C>>>,
    axum::Json(request): axum::Json<PlanRequest>,
) -> Response
where
    C: CourseCatalog + 'static,
{
    match service.plan(request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: PlanningServiceError) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        error!(error = %err, "planning request failed");
    }
    let payload = json!({
        "success": false,
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
