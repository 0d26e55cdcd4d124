use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{CriterionScores, Evaluation};

const COLUMNS: &str =
    "evaluation_id, evaluator_id, team_id, submission_id, scores, total_score, submitted_at";

/// Insert payload for an evaluation. total_score is computed by the service
/// from the sub-scores; nothing here comes straight from the wire.
pub struct NewEvaluation<'a> {
    pub evaluator_id: Uuid,
    pub team_id: Uuid,
    pub submission_id: Uuid,
    pub scores: &'a CriterionScores,
    pub total_score: Decimal,
}

/// Repository for evaluation rows. The (evaluator_id, team_id) unique index
/// settles duplicate submissions racing past the application-level check.
pub struct EvaluationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EvaluationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewEvaluation<'_>) -> Result<Evaluation> {
        let evaluation = sqlx::query_as::<_, Evaluation>(&format!(
            "INSERT INTO evaluations (evaluator_id, team_id, submission_id, scores, total_score)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(new.evaluator_id)
        .bind(new.team_id)
        .bind(new.submission_id)
        .bind(Json(new.scores))
        .bind(new.total_score)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).conflict_on_unique("You have already evaluated this team")
        })?;

        Ok(evaluation)
    }

    pub async fn find_by_pair(
        &self,
        evaluator_id: Uuid,
        team_id: Uuid,
    ) -> Result<Option<Evaluation>> {
        let evaluation = sqlx::query_as::<_, Evaluation>(&format!(
            "SELECT {COLUMNS} FROM evaluations WHERE evaluator_id = $1 AND team_id = $2"
        ))
        .bind(evaluator_id)
        .bind(team_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(evaluation)
    }

    pub async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<Evaluation>> {
        let evaluations = sqlx::query_as::<_, Evaluation>(&format!(
            "SELECT {COLUMNS} FROM evaluations WHERE team_id = $1 ORDER BY submitted_at DESC"
        ))
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        Ok(evaluations)
    }

    pub async fn list_by_evaluator(&self, evaluator_id: Uuid) -> Result<Vec<Evaluation>> {
        let evaluations = sqlx::query_as::<_, Evaluation>(&format!(
            "SELECT {COLUMNS} FROM evaluations WHERE evaluator_id = $1 ORDER BY submitted_at DESC"
        ))
        .bind(evaluator_id)
        .fetch_all(self.pool)
        .await?;

        Ok(evaluations)
    }

    pub async fn list_by_evaluator_for_teams(
        &self,
        evaluator_id: Uuid,
        team_ids: &[Uuid],
    ) -> Result<Vec<Evaluation>> {
        let evaluations = sqlx::query_as::<_, Evaluation>(&format!(
            "SELECT {COLUMNS} FROM evaluations WHERE evaluator_id = $1 AND team_id = ANY($2)"
        ))
        .bind(evaluator_id)
        .bind(team_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(evaluations)
    }

    pub async fn count_by_evaluator(&self, evaluator_id: Uuid) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM evaluations WHERE evaluator_id = $1")
                .bind(evaluator_id)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
