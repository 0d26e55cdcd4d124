use sqlx::PgPool;
use storage::{
    dto::assignment::{
        AssignEvaluatorsRequest, AutoAssignOutcome, BatchSummary, ManualAssignBatchOutcome,
        ManualAssignItemError, ManualAssignItemResult, WorkloadReport,
    },
    error::Result,
    models::Assignment,
    services::assignment,
};
use uuid::Uuid;

/// Fan evaluators out over every team.
pub async fn auto_assign(pool: &PgPool, admin_id: Uuid) -> Result<AutoAssignOutcome> {
    assignment::auto_assign(pool, admin_id).await
}

/// Run a manual assignment batch, item by item. One team's invalid list
/// never blocks a sibling's valid assignment; each item reports its own
/// success or failure.
pub async fn manual_assign_batch(
    pool: &PgPool,
    request: &AssignEvaluatorsRequest,
    items: &[storage::dto::assignment::ManualAssignmentInput],
) -> ManualAssignBatchOutcome {
    let mut results = Vec::new();
    let mut errors = Vec::new();

    for item in items {
        match assignment::manual_assign(pool, item.team_id, &item.evaluator_ids, request.admin_id)
            .await
        {
            Ok(outcome) => results.push(ManualAssignItemResult {
                team_id: item.team_id,
                assignment: outcome.assignment,
                is_update: outcome.is_update,
            }),
            Err(e) => errors.push(ManualAssignItemError {
                team_id: item.team_id,
                error: e.to_string(),
            }),
        }
    }

    ManualAssignBatchOutcome {
        summary: BatchSummary {
            total: items.len() as i64,
            successful: results.len() as i64,
            failed: errors.len() as i64,
        },
        results,
        errors,
    }
}

pub async fn list_assignments(pool: &PgPool) -> Result<Vec<Assignment>> {
    assignment::list_assignments(pool).await
}

pub async fn evaluator_workload(pool: &PgPool) -> Result<WorkloadReport> {
    assignment::evaluator_workload(pool).await
}
