use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::dto::completion::{AssignmentDetail, EvaluationStatus};
use crate::dto::decimal_to_f64;
use crate::error::Result;
use crate::repository::assignment::{AssignmentRepository, TeamEvaluationCount};
use crate::services::REQUIRED_EVALUATIONS;

/// System-wide evaluation progress across all assignments. Read-only and
/// safe at any time; with zero assignments it reports a well-defined
/// all-zero status.
pub async fn check_evaluation_completion(pool: &PgPool) -> Result<EvaluationStatus> {
    let counts = AssignmentRepository::new(pool).completion_counts().await?;
    Ok(summarize(counts))
}

/// A team is complete iff exactly the required number of evaluations exist.
/// The duplicate-pair index keeps the count from ever exceeding it.
pub fn is_complete(evaluation_count: i64) -> bool {
    evaluation_count == REQUIRED_EVALUATIONS as i64
}

pub(crate) fn summarize(counts: Vec<TeamEvaluationCount>) -> EvaluationStatus {
    let required = REQUIRED_EVALUATIONS as i64;
    let total_assignments = counts.len() as i64;

    if total_assignments == 0 {
        return EvaluationStatus {
            total_assignments: 0,
            completed_assignments: 0,
            pending_assignments: 0,
            completion_percentage: 0.0,
            total_evaluations_required: 0,
            total_evaluations_completed: 0,
            assignment_details: Vec::new(),
            message: "No assignments found".to_string(),
        };
    }

    let completed_assignments = counts
        .iter()
        .filter(|c| is_complete(c.evaluation_count))
        .count() as i64;
    let pending_assignments = total_assignments - completed_assignments;

    let total_evaluations_completed: i64 = counts
        .iter()
        .map(|c| c.evaluation_count.min(required))
        .sum();

    let completion_percentage = decimal_to_f64(
        (Decimal::from(completed_assignments) * Decimal::from(100)
            / Decimal::from(total_assignments))
        .round_dp(2),
    );

    let assignment_details: Vec<AssignmentDetail> = counts
        .into_iter()
        .map(|c| AssignmentDetail {
            team_id: c.team_id,
            team_name: c.team_name,
            is_complete: is_complete(c.evaluation_count),
            evaluation_count: c.evaluation_count,
        })
        .collect();

    let message = if completed_assignments == total_assignments {
        "All evaluations complete. Ready to publish results.".to_string()
    } else {
        format!("{pending_assignments} team(s) still pending evaluation completion.")
    };

    EvaluationStatus {
        total_assignments,
        completed_assignments,
        pending_assignments,
        completion_percentage,
        total_evaluations_required: total_assignments * required,
        total_evaluations_completed,
        assignment_details,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn team(name: &str, evaluation_count: i64) -> TeamEvaluationCount {
        TeamEvaluationCount {
            team_id: Uuid::new_v4(),
            team_name: name.to_string(),
            evaluation_count,
        }
    }

    #[test]
    fn test_zero_assignments_is_all_zero() {
        let status = summarize(Vec::new());
        assert_eq!(status.total_assignments, 0);
        assert_eq!(status.completion_percentage, 0.0);
        assert_eq!(status.total_evaluations_required, 0);
        assert!(status.assignment_details.is_empty());
    }

    #[test]
    fn test_mixed_progress() {
        let status = summarize(vec![team("alpha", 3), team("beta", 1), team("gamma", 0)]);

        assert_eq!(status.total_assignments, 3);
        assert_eq!(status.completed_assignments, 1);
        assert_eq!(status.pending_assignments, 2);
        assert_eq!(status.completion_percentage, 33.33);
        assert_eq!(status.total_evaluations_required, 9);
        assert_eq!(status.total_evaluations_completed, 4);
        assert!(status.message.contains("2 team(s) still pending"));
    }

    #[test]
    fn test_all_complete_is_ready_to_publish() {
        let status = summarize(vec![team("alpha", 3), team("beta", 3)]);

        assert_eq!(status.completion_percentage, 100.0);
        assert_eq!(status.message, "All evaluations complete. Ready to publish results.");
        assert!(status.assignment_details.iter().all(|d| d.is_complete));
    }

    #[test]
    fn test_exactly_three_means_complete() {
        assert!(!is_complete(2));
        assert!(is_complete(3));
        assert!(!is_complete(4));
    }
}
