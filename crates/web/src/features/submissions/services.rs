use sqlx::PgPool;
use storage::{
    dto::submission::{SubmissionResponse, TeamScores},
    error::Result,
    services::submission,
};
use uuid::Uuid;

/// Create or replace the team's video submission. Returns whether a new row
/// was created.
pub async fn save_submission(
    pool: &PgPool,
    team_id: Uuid,
    video_url: &str,
) -> Result<(SubmissionResponse, bool)> {
    submission::save_submission(pool, team_id, video_url).await
}

pub async fn get_submission(pool: &PgPool, team_id: Uuid) -> Result<SubmissionResponse> {
    submission::get_submission(pool, team_id).await
}

pub async fn team_scores(pool: &PgPool, team_id: Uuid) -> Result<TeamScores> {
    submission::team_scores(pool, team_id).await
}
