use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::submission::{SaveSubmissionRequest, SubmissionResponse, TeamScores},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    put,
    path = "/api/teams/{team_id}/submission",
    params(
        ("team_id" = Uuid, Path, description = "Team submitting the video")
    ),
    request_body = SaveSubmissionRequest,
    responses(
        (status = 200, description = "Existing submission updated", body = SubmissionResponse),
        (status = 201, description = "Submission created", body = SubmissionResponse),
        (status = 400, description = "Video URL is not http/https"),
        (status = 404, description = "Team not found")
    ),
    tag = "submissions"
)]
pub async fn save_submission(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<SaveSubmissionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (submission, created) =
        services::save_submission(db.pool(), team_id, &req.video_url).await?;

    tracing::info!(%team_id, created, "Submission saved");

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(submission)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{team_id}/submission",
    params(
        ("team_id" = Uuid, Path, description = "Team whose submission to fetch")
    ),
    responses(
        (status = 200, description = "The team's submission", body = SubmissionResponse),
        (status = 404, description = "No submission yet")
    ),
    tag = "submissions"
)]
pub async fn get_submission(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let submission = services::get_submission(db.pool(), team_id).await?;

    Ok(Json(submission).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{team_id}/scores",
    params(
        ("team_id" = Uuid, Path, description = "Team whose received scores to fetch")
    ),
    responses(
        (status = 200, description = "Received evaluations with per-criterion breakdown", body = TeamScores),
        (status = 404, description = "No submission yet")
    ),
    tag = "submissions"
)]
pub async fn get_scores(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let scores = services::team_scores(db.pool(), team_id).await?;

    Ok(Json(scores).into_response())
}
