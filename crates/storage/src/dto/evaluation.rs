use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::CriterionScores;

/// Request payload for scoring a team. The total is never part of the
/// request; it is derived from the sub-scores at write time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitEvaluationRequest {
    pub scores: CriterionScores,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStatus {
    pub evaluation_count: i32,
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOutcome {
    pub evaluation_id: Uuid,
    pub total_score: f64,
    pub submission_status: SubmissionStatus,
}

/// One team on an evaluator's worklist, with whatever the team has
/// submitted and whether this evaluator has already scored it.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTeam {
    pub team_id: Uuid,
    pub team_name: String,
    pub team_email: String,
    pub video_url: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub evaluated: bool,
    pub evaluation_submitted_at: Option<DateTime<Utc>>,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorAssignments {
    pub assignments: Vec<AssignedTeam>,
    pub total_assigned: i64,
    pub completed: i64,
    pub pending: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub evaluation_id: Uuid,
    pub team_id: Uuid,
    pub team_name: String,
    pub team_email: String,
    pub total_score: f64,
    pub scores: CriterionScores,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorEvaluations {
    pub evaluations: Vec<EvaluationSummary>,
    pub total_evaluations: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorProgress {
    pub total_assigned: i64,
    pub completed_evaluations: i64,
    pub pending_evaluations: i64,
    pub completion_percentage: f64,
}

/// Outcome of the reconciliation pass that re-derives a team's counters
/// from its evaluation rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeOutcome {
    pub evaluation_count: i32,
    pub average_score: Option<f64>,
    pub message: String,
}
