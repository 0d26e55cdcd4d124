use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::decimal_to_f64;
use crate::dto::evaluation::{
    AssignedTeam, EvaluationOutcome, EvaluationSummary, EvaluatorAssignments,
    EvaluatorEvaluations, EvaluatorProgress, RecomputeOutcome, SubmissionStatus,
};
use crate::error::{Result, StorageError};
use crate::models::user::role;
use crate::models::{CriterionScores, User};
use crate::repository::assignment::AssignmentRepository;
use crate::repository::evaluation::{EvaluationRepository, NewEvaluation};
use crate::repository::submission::SubmissionRepository;
use crate::repository::user::UserRepository;
use crate::services::REQUIRED_EVALUATIONS;

/// Average of a completed set of totals. None unless exactly the required
/// number of evaluations exist; the arithmetic mean is rounded to 2 decimal
/// places the moment the set completes, and never recomputed from fewer.
pub(crate) fn derived_average(totals: &[Decimal]) -> Option<Decimal> {
    if totals.len() != REQUIRED_EVALUATIONS as usize {
        return None;
    }

    let sum: Decimal = totals.iter().copied().sum();
    Some((sum / Decimal::from(REQUIRED_EVALUATIONS)).round_dp(2))
}

/// Records one evaluator's scores for one team. Preconditions are checked in
/// a fixed order so every failure has a stable, distinct reason; the
/// evaluation write always precedes the counter update.
pub async fn submit_evaluation(
    pool: &PgPool,
    evaluator_id: Uuid,
    team_id: Uuid,
    scores: &CriterionScores,
) -> Result<EvaluationOutcome> {
    let assignments = AssignmentRepository::new(pool);
    if assignments
        .find_active_for_pair(team_id, evaluator_id)
        .await?
        .is_none()
    {
        return Err(StorageError::Forbidden(
            "You are not assigned to evaluate this team".to_string(),
        ));
    }

    let submissions = SubmissionRepository::new(pool);
    let submission = submissions.find_by_team(team_id).await?.ok_or_else(|| {
        StorageError::Precondition("Team has not submitted their video yet".to_string())
    })?;

    let evaluations = EvaluationRepository::new(pool);
    if evaluations
        .find_by_pair(evaluator_id, team_id)
        .await?
        .is_some()
    {
        return Err(StorageError::Conflict(
            "You have already evaluated this team".to_string(),
        ));
    }

    scores.validate()?;

    let evaluation = evaluations
        .create(NewEvaluation {
            evaluator_id,
            team_id,
            submission_id: submission.submission_id,
            scores,
            total_score: scores.total(),
        })
        .await?;

    // At the third evaluation the average is derived from all three
    // persisted rows, not from the one just written.
    let count = submission.evaluation_count + 1;
    let average = if count == REQUIRED_EVALUATIONS {
        let rows = evaluations.list_by_team(team_id).await?;
        let totals: Vec<Decimal> = rows.iter().map(|r| r.total_score).collect();
        derived_average(&totals)
    } else {
        None
    };

    let updated = submissions.set_counters(team_id, count, average).await?;

    Ok(EvaluationOutcome {
        evaluation_id: evaluation.evaluation_id,
        total_score: decimal_to_f64(evaluation.total_score),
        submission_status: SubmissionStatus {
            evaluation_count: updated.evaluation_count,
            average_score: updated.average_score.map(decimal_to_f64),
        },
    })
}

/// Re-derives a team's counters purely from its evaluation rows. Idempotent;
/// the repair path when a counter is suspected stale.
pub async fn recompute_average(pool: &PgPool, team_id: Uuid) -> Result<RecomputeOutcome> {
    let rows = EvaluationRepository::new(pool).list_by_team(team_id).await?;
    let totals: Vec<Decimal> = rows.iter().map(|r| r.total_score).collect();

    let count = rows.len() as i32;
    let average = derived_average(&totals);

    let submission = SubmissionRepository::new(pool)
        .set_counters(team_id, count, average)
        .await?;

    let message = if count == REQUIRED_EVALUATIONS {
        "All evaluations complete".to_string()
    } else {
        format!("{count}/{REQUIRED_EVALUATIONS} evaluations complete")
    };

    Ok(RecomputeOutcome {
        evaluation_count: submission.evaluation_count,
        average_score: submission.average_score.map(decimal_to_f64),
        message,
    })
}

async fn require_evaluator(users: &UserRepository<'_>, evaluator_id: Uuid) -> Result<User> {
    let user = match users.find_by_id(evaluator_id).await {
        Ok(user) => user,
        Err(StorageError::NotFound) => {
            return Err(StorageError::NotFoundMsg("Evaluator not found".to_string()));
        }
        Err(e) => return Err(e),
    };

    if user.role != role::EVALUATOR {
        return Err(StorageError::Validation(
            "Specified user is not an evaluator".to_string(),
        ));
    }

    Ok(user)
}

/// The evaluator's worklist: every actively assigned team, what it has
/// submitted, and whether this evaluator has scored it yet.
pub async fn evaluator_assignments(pool: &PgPool, evaluator_id: Uuid) -> Result<EvaluatorAssignments> {
    let users = UserRepository::new(pool);
    require_evaluator(&users, evaluator_id).await?;

    let assignments = AssignmentRepository::new(pool)
        .list_active_for_evaluator(evaluator_id)
        .await?;

    if assignments.is_empty() {
        return Ok(EvaluatorAssignments::default());
    }

    let team_ids: Vec<Uuid> = assignments.iter().map(|a| a.team_id).collect();

    let teams: HashMap<Uuid, User> = users
        .find_by_ids_with_role(&team_ids, role::TEAM)
        .await?
        .into_iter()
        .map(|u| (u.user_id, u))
        .collect();

    let submissions: HashMap<Uuid, _> = SubmissionRepository::new(pool)
        .find_by_teams(&team_ids)
        .await?
        .into_iter()
        .map(|s| (s.team_id, s))
        .collect();

    let evaluations: HashMap<Uuid, _> = EvaluationRepository::new(pool)
        .list_by_evaluator_for_teams(evaluator_id, &team_ids)
        .await?
        .into_iter()
        .map(|e| (e.team_id, e))
        .collect();

    let entries: Vec<AssignedTeam> = assignments
        .iter()
        .map(|assignment| {
            let team = teams.get(&assignment.team_id);
            let submission = submissions.get(&assignment.team_id);
            let evaluation = evaluations.get(&assignment.team_id);

            AssignedTeam {
                team_id: assignment.team_id,
                team_name: team.map(|t| t.name.clone()).unwrap_or_else(unknown_team),
                team_email: team.map(|t| t.email.clone()).unwrap_or_default(),
                video_url: submission.map(|s| s.video_url.clone()),
                submitted_at: submission.map(|s| s.submitted_at),
                evaluated: evaluation.is_some(),
                evaluation_submitted_at: evaluation.map(|e| e.submitted_at),
                assigned_at: assignment.assigned_at,
            }
        })
        .collect();

    let completed = entries.iter().filter(|e| e.evaluated).count() as i64;

    Ok(EvaluatorAssignments {
        total_assigned: entries.len() as i64,
        pending: entries.len() as i64 - completed,
        completed,
        assignments: entries,
    })
}

/// Every evaluation this evaluator has submitted, newest first.
pub async fn evaluator_evaluations(
    pool: &PgPool,
    evaluator_id: Uuid,
) -> Result<EvaluatorEvaluations> {
    let users = UserRepository::new(pool);
    require_evaluator(&users, evaluator_id).await?;

    let evaluations = EvaluationRepository::new(pool)
        .list_by_evaluator(evaluator_id)
        .await?;

    let team_ids: Vec<Uuid> = evaluations.iter().map(|e| e.team_id).collect();
    let teams: HashMap<Uuid, User> = users
        .find_by_ids_with_role(&team_ids, role::TEAM)
        .await?
        .into_iter()
        .map(|u| (u.user_id, u))
        .collect();

    let summaries: Vec<EvaluationSummary> = evaluations
        .into_iter()
        .map(|evaluation| {
            let team = teams.get(&evaluation.team_id);
            EvaluationSummary {
                evaluation_id: evaluation.evaluation_id,
                team_id: evaluation.team_id,
                team_name: team.map(|t| t.name.clone()).unwrap_or_else(unknown_team),
                team_email: team.map(|t| t.email.clone()).unwrap_or_default(),
                total_score: decimal_to_f64(evaluation.total_score),
                scores: evaluation.scores.0,
                submitted_at: evaluation.submitted_at,
            }
        })
        .collect();

    Ok(EvaluatorEvaluations {
        total_evaluations: summaries.len() as i64,
        evaluations: summaries,
    })
}

/// Assigned vs. completed counts for one evaluator.
pub async fn evaluator_progress(pool: &PgPool, evaluator_id: Uuid) -> Result<EvaluatorProgress> {
    let users = UserRepository::new(pool);
    require_evaluator(&users, evaluator_id).await?;

    let total_assigned = AssignmentRepository::new(pool)
        .count_for_evaluator(evaluator_id)
        .await?;
    let completed_evaluations = EvaluationRepository::new(pool)
        .count_by_evaluator(evaluator_id)
        .await?;

    let completion_percentage = if total_assigned > 0 {
        let percentage =
            Decimal::from(completed_evaluations) * Decimal::from(100) / Decimal::from(total_assigned);
        decimal_to_f64(percentage.round_dp(2))
    } else {
        0.0
    };

    Ok(EvaluatorProgress {
        total_assigned,
        completed_evaluations,
        pending_evaluations: total_assigned - completed_evaluations,
        completion_percentage,
    })
}

fn unknown_team() -> String {
    "Unknown Team".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_no_average_below_three_evaluations() {
        assert_eq!(derived_average(&[]), None);
        assert_eq!(derived_average(&[dec(90)]), None);
        assert_eq!(derived_average(&[dec(90), dec(80)]), None);
    }

    #[test]
    fn test_average_of_exactly_three() {
        let average = derived_average(&[dec(90), dec(85), dec(84)]).unwrap();
        assert_eq!(average.to_string(), "86.33");
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        let average = derived_average(&[dec(100), dec(100), dec(99)]).unwrap();
        assert_eq!(average.to_string(), "99.67");
    }

    #[test]
    fn test_no_average_above_three_evaluations() {
        // structurally prevented by the unique pair index; the math stays
        // strict anyway
        assert_eq!(derived_average(&[dec(1), dec(2), dec(3), dec(4)]), None);
    }
}
