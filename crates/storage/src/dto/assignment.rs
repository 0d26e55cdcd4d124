use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Assignment;

/// Request payload for the assignment endpoint. Auto mode fans out over all
/// teams; manual mode carries an explicit per-team list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignEvaluatorsRequest {
    #[validate(custom(function = "validate_mode"))]
    pub mode: String,

    pub admin_id: Uuid,

    pub manual: Option<Vec<ManualAssignmentInput>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualAssignmentInput {
    pub team_id: Uuid,
    pub evaluator_ids: Vec<Uuid>,
}

fn validate_mode(mode: &str) -> Result<(), validator::ValidationError> {
    const VALID_MODES: &[&str] = &["auto", "manual"];

    if VALID_MODES.contains(&mode) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_mode"))
    }
}

/// Response shape for a persisted assignment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub assignment_id: Uuid,
    pub team_id: Uuid,
    pub evaluator_ids: Vec<Uuid>,
    pub assigned_by: Uuid,
    pub assigned_at: DateTime<Utc>,
    pub status: String,
}

impl From<Assignment> for AssignmentResponse {
    fn from(assignment: Assignment) -> Self {
        Self {
            assignment_id: assignment.assignment_id,
            team_id: assignment.team_id,
            evaluator_ids: assignment.evaluator_ids,
            assigned_by: assignment.assigned_by,
            assigned_at: assignment.assigned_at,
            status: assignment.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentStatistics {
    pub total_teams: i64,
    pub total_evaluators: i64,
    pub assignments_created: i64,
    pub evaluators_per_team: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorWorkload {
    pub evaluator_id: Uuid,
    pub name: String,
    pub email: String,
    pub assigned_teams: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadReport {
    pub total_evaluators: i64,
    pub workload: Vec<EvaluatorWorkload>,
    pub average_workload: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoAssignOutcome {
    pub statistics: AssignmentStatistics,
    pub workload_distribution: WorkloadReport,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualAssignOutcome {
    pub assignment: AssignmentResponse,
    pub is_update: bool,
}

/// Per-item result of a manual assignment batch. One team's failure never
/// aborts a sibling's valid assignment.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualAssignItemResult {
    pub team_id: Uuid,
    pub assignment: AssignmentResponse,
    pub is_update: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualAssignItemError {
    pub team_id: Uuid,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: i64,
    pub successful: i64,
    pub failed: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualAssignBatchOutcome {
    pub results: Vec<ManualAssignItemResult>,
    pub errors: Vec<ManualAssignItemError>,
    pub summary: BatchSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_validation() {
        assert!(validate_mode("auto").is_ok());
        assert!(validate_mode("manual").is_ok());
        assert!(validate_mode("hybrid").is_err());
    }
}
