use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::evaluation::{
        EvaluationOutcome, EvaluatorAssignments, EvaluatorEvaluations, EvaluatorProgress,
        RecomputeOutcome, SubmitEvaluationRequest,
    },
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/evaluators/{evaluator_id}/teams/{team_id}/evaluation",
    params(
        ("evaluator_id" = Uuid, Path, description = "Evaluator scoring the team"),
        ("team_id" = Uuid, Path, description = "Team being scored")
    ),
    request_body = SubmitEvaluationRequest,
    responses(
        (status = 201, description = "Evaluation recorded", body = EvaluationOutcome),
        (status = 400, description = "Out-of-range score or team has no submission"),
        (status = 403, description = "Evaluator not assigned to this team"),
        (status = 409, description = "Evaluator already scored this team")
    ),
    tag = "evaluations"
)]
pub async fn submit_evaluation(
    State(db): State<Database>,
    Path((evaluator_id, team_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<SubmitEvaluationRequest>,
) -> Result<Response, WebError> {
    let outcome =
        services::submit_evaluation(db.pool(), evaluator_id, team_id, &req.scores).await?;

    tracing::info!(
        %evaluator_id,
        %team_id,
        total = outcome.total_score,
        "Evaluation submitted"
    );

    Ok((StatusCode::CREATED, Json(outcome)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/evaluators/{evaluator_id}/assignments",
    params(
        ("evaluator_id" = Uuid, Path, description = "Evaluator to list the worklist for")
    ),
    responses(
        (status = 200, description = "Assigned teams with submission and scoring state", body = EvaluatorAssignments),
        (status = 404, description = "Evaluator not found")
    ),
    tag = "evaluations"
)]
pub async fn get_assignments(
    State(db): State<Database>,
    Path(evaluator_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let assignments = services::evaluator_assignments(db.pool(), evaluator_id).await?;

    Ok(Json(assignments).into_response())
}

#[utoipa::path(
    get,
    path = "/api/evaluators/{evaluator_id}/evaluations",
    params(
        ("evaluator_id" = Uuid, Path, description = "Evaluator whose submitted evaluations to list")
    ),
    responses(
        (status = 200, description = "Submitted evaluations, newest first", body = EvaluatorEvaluations),
        (status = 404, description = "Evaluator not found")
    ),
    tag = "evaluations"
)]
pub async fn get_evaluations(
    State(db): State<Database>,
    Path(evaluator_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let evaluations = services::evaluator_evaluations(db.pool(), evaluator_id).await?;

    Ok(Json(evaluations).into_response())
}

#[utoipa::path(
    get,
    path = "/api/evaluators/{evaluator_id}/progress",
    params(
        ("evaluator_id" = Uuid, Path, description = "Evaluator to report progress for")
    ),
    responses(
        (status = 200, description = "Assigned vs. completed evaluation counts", body = EvaluatorProgress),
        (status = 404, description = "Evaluator not found")
    ),
    tag = "evaluations"
)]
pub async fn get_progress(
    State(db): State<Database>,
    Path(evaluator_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let progress = services::evaluator_progress(db.pool(), evaluator_id).await?;

    Ok(Json(progress).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/teams/{team_id}/recompute",
    params(
        ("team_id" = Uuid, Path, description = "Team whose counters to re-derive")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Counters re-derived from evaluation rows", body = RecomputeOutcome),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team has no submission")
    ),
    tag = "evaluations"
)]
pub async fn recompute_average(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let outcome = services::recompute_average(db.pool(), team_id).await?;

    tracing::info!(%team_id, count = outcome.evaluation_count, "Counters recomputed");

    Ok(Json(outcome).into_response())
}
