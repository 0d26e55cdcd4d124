use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Submission;

const COLUMNS: &str =
    "submission_id, team_id, video_url, submitted_at, updated_at, evaluation_count, average_score";

/// Repository for submission rows. One row per team, enforced by the
/// team_id unique index.
pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_team(&self, team_id: Uuid) -> Result<Option<Submission>> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "SELECT {COLUMNS} FROM submissions WHERE team_id = $1"
        ))
        .bind(team_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(submission)
    }

    pub async fn create(&self, team_id: Uuid, video_url: &str) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "INSERT INTO submissions (team_id, video_url)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        ))
        .bind(team_id)
        .bind(video_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).conflict_on_unique("Team already has a submission"))?;

        Ok(submission)
    }

    /// Replaces the video URL on resubmission. Evaluation counters are
    /// untouched; only updated_at moves.
    pub async fn update_video_url(&self, team_id: Uuid, video_url: &str) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "UPDATE submissions
             SET video_url = $2, updated_at = now()
             WHERE team_id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(team_id)
        .bind(video_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(submission)
    }

    /// Writes the denormalized evaluation counters. Called by the same
    /// operation that writes an evaluation, and by the reconciliation path.
    pub async fn set_counters(
        &self,
        team_id: Uuid,
        evaluation_count: i32,
        average_score: Option<Decimal>,
    ) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "UPDATE submissions
             SET evaluation_count = $2, average_score = $3
             WHERE team_id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(team_id)
        .bind(evaluation_count)
        .bind(average_score)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(submission)
    }

    /// Submissions eligible for the leaderboard: average present, best first.
    pub async fn list_scored(&self) -> Result<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(&format!(
            "SELECT {COLUMNS} FROM submissions
             WHERE average_score IS NOT NULL
             ORDER BY average_score DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }

    pub async fn find_by_teams(&self, team_ids: &[Uuid]) -> Result<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(&format!(
            "SELECT {COLUMNS} FROM submissions WHERE team_id = ANY($1)"
        ))
        .bind(team_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }
}
