use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetail {
    pub team_id: Uuid,
    pub team_name: String,
    pub evaluation_count: i64,
    pub is_complete: bool,
}

/// System-wide evaluation progress. A pure aggregation; safe to request at
/// any time, including before any assignment exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationStatus {
    pub total_assignments: i64,
    pub completed_assignments: i64,
    pub pending_assignments: i64,
    pub completion_percentage: f64,
    pub total_evaluations_required: i64,
    pub total_evaluations_completed: i64,
    pub assignment_details: Vec<AssignmentDetail>,
    pub message: String,
}
