use sqlx::PgPool;
use storage::{
    dto::evaluation::{
        EvaluationOutcome, EvaluatorAssignments, EvaluatorEvaluations, EvaluatorProgress,
        RecomputeOutcome,
    },
    error::Result,
    models::CriterionScores,
    services::evaluation,
};
use uuid::Uuid;

/// Record one evaluator's scores for one team.
pub async fn submit_evaluation(
    pool: &PgPool,
    evaluator_id: Uuid,
    team_id: Uuid,
    scores: &CriterionScores,
) -> Result<EvaluationOutcome> {
    evaluation::submit_evaluation(pool, evaluator_id, team_id, scores).await
}

/// Re-derive a team's counters from its evaluation rows.
pub async fn recompute_average(pool: &PgPool, team_id: Uuid) -> Result<RecomputeOutcome> {
    evaluation::recompute_average(pool, team_id).await
}

pub async fn evaluator_assignments(
    pool: &PgPool,
    evaluator_id: Uuid,
) -> Result<EvaluatorAssignments> {
    evaluation::evaluator_assignments(pool, evaluator_id).await
}

pub async fn evaluator_evaluations(
    pool: &PgPool,
    evaluator_id: Uuid,
) -> Result<EvaluatorEvaluations> {
    evaluation::evaluator_evaluations(pool, evaluator_id).await
}

pub async fn evaluator_progress(pool: &PgPool, evaluator_id: Uuid) -> Result<EvaluatorProgress> {
    evaluation::evaluator_progress(pool, evaluator_id).await
}
