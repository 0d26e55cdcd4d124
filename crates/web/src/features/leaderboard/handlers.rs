use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::completion::EvaluationStatus,
    dto::criteria::CriteriaCatalogue,
    dto::leaderboard::{LeaderboardView, PublishOutcome, PublishResultsRequest},
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/results/publish",
    request_body = PublishResultsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Results published", body = PublishOutcome),
        (status = 400, description = "Publication refused; incomplete teams are enumerated"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "leaderboard"
)]
pub async fn publish_results(
    State(db): State<Database>,
    Json(req): Json<PublishResultsRequest>,
) -> Result<Response, WebError> {
    let outcome = services::publish_results(db.pool(), req.admin_id).await?;

    tracing::info!(teams = outcome.total_teams, "Results published");

    Ok(Json(outcome).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "The published leaderboard, or a not-published marker", body = LeaderboardView)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(State(db): State<Database>) -> Result<Response, WebError> {
    let view = services::load_leaderboard(db.pool()).await?;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/evaluation-status",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "System-wide evaluation completion", body = EvaluationStatus),
        (status = 401, description = "Unauthorized")
    ),
    tag = "leaderboard"
)]
pub async fn get_evaluation_status(State(db): State<Database>) -> Result<Response, WebError> {
    let status = services::evaluation_status(db.pool()).await?;

    Ok(Json(status).into_response())
}

#[utoipa::path(
    get,
    path = "/api/criteria",
    responses(
        (status = 200, description = "The scoring rubric", body = CriteriaCatalogue)
    ),
    tag = "leaderboard"
)]
pub async fn get_criteria() -> Response {
    Json(CriteriaCatalogue::current()).into_response()
}
