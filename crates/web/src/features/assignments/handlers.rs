use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::assignment::{
        AssignEvaluatorsRequest, AssignmentResponse, AutoAssignOutcome, ManualAssignBatchOutcome,
        WorkloadReport,
    },
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/assignments",
    request_body = AssignEvaluatorsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Assignment run completed", body = AutoAssignOutcome),
        (status = 400, description = "Invalid mode or unmet precondition"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Assignments already exist")
    ),
    tag = "assignments"
)]
pub async fn assign_evaluators(
    State(db): State<Database>,
    Json(req): Json<AssignEvaluatorsRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    match req.mode.as_str() {
        "auto" => {
            let outcome = services::auto_assign(db.pool(), req.admin_id).await?;
            tracing::info!(
                assignments = outcome.statistics.assignments_created,
                "Auto-assignment completed"
            );
            Ok(Json(outcome).into_response())
        }
        _ => {
            let items = req.manual.as_deref().filter(|m| !m.is_empty()).ok_or_else(|| {
                WebError::BadRequest(
                    "Please provide manual assignment data as array of {teamId, evaluatorIds}"
                        .to_string(),
                )
            })?;

            let outcome: ManualAssignBatchOutcome =
                services::manual_assign_batch(db.pool(), &req, items).await;
            tracing::info!(
                successful = outcome.summary.successful,
                failed = outcome.summary.failed,
                "Manual assignment batch completed"
            );
            Ok(Json(outcome).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/assignments",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All assignments, newest first", body = Vec<AssignmentResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "assignments"
)]
pub async fn list_assignments(State(db): State<Database>) -> Result<Response, WebError> {
    let assignments = services::list_assignments(db.pool()).await?;

    let response: Vec<AssignmentResponse> = assignments
        .into_iter()
        .map(AssignmentResponse::from)
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/assignments/workload",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Active assignments per evaluator, heaviest first", body = WorkloadReport),
        (status = 401, description = "Unauthorized")
    ),
    tag = "assignments"
)]
pub async fn get_workload(State(db): State<Database>) -> Result<Response, WebError> {
    let report = services::evaluator_workload(db.pool()).await?;

    Ok(Json(report).into_response())
}
