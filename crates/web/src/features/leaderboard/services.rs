use sqlx::PgPool;
use storage::{
    dto::completion::EvaluationStatus,
    dto::leaderboard::{LeaderboardView, PublishOutcome},
    error::Result,
    services::{completion, leaderboard},
};
use uuid::Uuid;

/// Validate completion across every assignment, then replace the published
/// snapshot.
pub async fn publish_results(pool: &PgPool, admin_id: Uuid) -> Result<PublishOutcome> {
    leaderboard::publish_results(pool, admin_id).await
}

pub async fn load_leaderboard(pool: &PgPool) -> Result<LeaderboardView> {
    leaderboard::load_published_leaderboard(pool).await
}

pub async fn evaluation_status(pool: &PgPool) -> Result<EvaluationStatus> {
    completion::check_evaluation_completion(pool).await
}
