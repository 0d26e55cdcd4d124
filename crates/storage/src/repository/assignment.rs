use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Assignment;
use crate::models::assignment::status;

const COLUMNS: &str = "assignment_id, team_id, evaluator_ids, assigned_by, assigned_at, status";

/// Per-team evaluation progress, joined against the identity directory for
/// display names. One row per assignment.
#[derive(Debug, Clone, FromRow)]
pub struct TeamEvaluationCount {
    pub team_id: Uuid,
    pub team_name: String,
    pub evaluation_count: i64,
}

/// Repository for assignment rows. The team_id unique index backs the
/// one-assignment-per-team invariant.
pub struct AssignmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AssignmentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assignments")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn list_all(&self) -> Result<Vec<Assignment>> {
        let assignments = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {COLUMNS} FROM assignments ORDER BY assigned_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(assignments)
    }

    pub async fn list_active(&self) -> Result<Vec<Assignment>> {
        let assignments = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {COLUMNS} FROM assignments WHERE status = $1"
        ))
        .bind(status::ACTIVE)
        .fetch_all(self.pool)
        .await?;

        Ok(assignments)
    }

    pub async fn find_by_team(&self, team_id: Uuid) -> Result<Option<Assignment>> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {COLUMNS} FROM assignments WHERE team_id = $1"
        ))
        .bind(team_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(assignment)
    }

    /// The active assignment linking this evaluator to this team, if any.
    /// This is the gate every score submission passes through.
    pub async fn find_active_for_pair(
        &self,
        team_id: Uuid,
        evaluator_id: Uuid,
    ) -> Result<Option<Assignment>> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE team_id = $1 AND $2 = ANY(evaluator_ids) AND status = $3"
        ))
        .bind(team_id)
        .bind(evaluator_id)
        .bind(status::ACTIVE)
        .fetch_optional(self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn list_active_for_evaluator(&self, evaluator_id: Uuid) -> Result<Vec<Assignment>> {
        let assignments = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE $1 = ANY(evaluator_ids) AND status = $2
             ORDER BY assigned_at"
        ))
        .bind(evaluator_id)
        .bind(status::ACTIVE)
        .fetch_all(self.pool)
        .await?;

        Ok(assignments)
    }

    pub async fn count_for_evaluator(&self, evaluator_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM assignments WHERE $1 = ANY(evaluator_ids)",
        )
        .bind(evaluator_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    pub async fn create(
        &self,
        team_id: Uuid,
        evaluator_ids: &[Uuid],
        admin_id: Uuid,
    ) -> Result<Assignment> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "INSERT INTO assignments (team_id, evaluator_ids, assigned_by, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        ))
        .bind(team_id)
        .bind(evaluator_ids)
        .bind(admin_id)
        .bind(status::ACTIVE)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).conflict_on_unique("Team already has an assignment"))?;

        Ok(assignment)
    }

    /// Whole-set replacement of a team's evaluators. Partial updates are not
    /// a thing: reassignment always swaps all three.
    pub async fn replace_evaluators(
        &self,
        team_id: Uuid,
        evaluator_ids: &[Uuid],
        admin_id: Uuid,
    ) -> Result<Assignment> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "UPDATE assignments
             SET evaluator_ids = $2, assigned_by = $3, assigned_at = now()
             WHERE team_id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(team_id)
        .bind(evaluator_ids)
        .bind(admin_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(assignment)
    }

    /// Inserts one assignment per planned team in a single transaction, so a
    /// failed auto-assign run leaves no partial fan-out behind.
    pub async fn insert_many(
        &self,
        admin_id: Uuid,
        plans: &[(Uuid, [Uuid; 3])],
    ) -> Result<Vec<Assignment>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(plans.len());

        for (team_id, evaluator_ids) in plans {
            let assignment = sqlx::query_as::<_, Assignment>(&format!(
                "INSERT INTO assignments (team_id, evaluator_ids, assigned_by, status)
                 VALUES ($1, $2, $3, $4)
                 RETURNING {COLUMNS}"
            ))
            .bind(team_id)
            .bind(&evaluator_ids[..])
            .bind(admin_id)
            .bind(status::ACTIVE)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                StorageError::from(e).conflict_on_unique("Team already has an assignment")
            })?;

            created.push(assignment);
        }

        tx.commit().await?;

        Ok(created)
    }

    /// Evaluation progress for every assigned team in one aggregate query.
    pub async fn completion_counts(&self) -> Result<Vec<TeamEvaluationCount>> {
        let rows = sqlx::query_as::<_, TeamEvaluationCount>(
            r#"
            SELECT a.team_id, u.name AS team_name, COUNT(e.evaluation_id) AS evaluation_count
            FROM assignments a
            INNER JOIN users u ON u.user_id = a.team_id
            LEFT JOIN evaluations e ON e.team_id = a.team_id
            GROUP BY a.team_id, u.name, a.assigned_at
            ORDER BY a.assigned_at
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
