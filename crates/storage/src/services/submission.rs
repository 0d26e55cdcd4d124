use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::decimal_to_f64;
use crate::dto::submission::{
    CriterionBreakdown, EvaluatorComment, SubmissionResponse, TeamEvaluationView, TeamScores,
};
use crate::error::{Result, StorageError};
use crate::models::user::role;
use crate::models::{Criterion, CriterionScores, User};
use crate::repository::evaluation::EvaluationRepository;
use crate::repository::submission::SubmissionRepository;
use crate::repository::user::UserRepository;
use crate::services::REQUIRED_EVALUATIONS;

async fn require_team(users: &UserRepository<'_>, team_id: Uuid) -> Result<User> {
    let user = match users.find_by_id(team_id).await {
        Ok(user) => user,
        Err(StorageError::NotFound) => {
            return Err(StorageError::NotFoundMsg("Team not found".to_string()));
        }
        Err(e) => return Err(e),
    };

    if user.role != role::TEAM {
        return Err(StorageError::Validation(
            "Specified user is not a team".to_string(),
        ));
    }

    Ok(user)
}

/// Creates the team's submission, or replaces the video URL on
/// resubmission. Returns whether a new row was created.
pub async fn save_submission(
    pool: &PgPool,
    team_id: Uuid,
    video_url: &str,
) -> Result<(SubmissionResponse, bool)> {
    let users = UserRepository::new(pool);
    require_team(&users, team_id).await?;

    let repo = SubmissionRepository::new(pool);
    match repo.find_by_team(team_id).await? {
        Some(_) => {
            let updated = repo.update_video_url(team_id, video_url).await?;
            Ok((updated.into(), false))
        }
        None => {
            let created = repo.create(team_id, video_url).await?;
            Ok((created.into(), true))
        }
    }
}

pub async fn get_submission(pool: &PgPool, team_id: Uuid) -> Result<SubmissionResponse> {
    let submission = SubmissionRepository::new(pool)
        .find_by_team(team_id)
        .await?
        .ok_or_else(|| {
            StorageError::NotFoundMsg("No submission found for this team".to_string())
        })?;

    Ok(submission.into())
}

/// Everything a team gets to see about its own scoring: each received
/// evaluation, the running average, and a per-criterion breakdown with the
/// evaluators' comments.
pub async fn team_scores(pool: &PgPool, team_id: Uuid) -> Result<TeamScores> {
    let submission = SubmissionRepository::new(pool)
        .find_by_team(team_id)
        .await?
        .ok_or_else(|| {
            StorageError::NotFoundMsg(
                "No submission found. Please submit your video first.".to_string(),
            )
        })?;

    let evaluations = EvaluationRepository::new(pool).list_by_team(team_id).await?;

    if evaluations.is_empty() {
        return Ok(TeamScores {
            evaluations: Vec::new(),
            average_score: None,
            evaluation_count: 0,
            breakdown: None,
            status: "pending".to_string(),
        });
    }

    let evaluator_ids: Vec<Uuid> = evaluations.iter().map(|e| e.evaluator_id).collect();
    let evaluators: HashMap<Uuid, User> = UserRepository::new(pool)
        .find_by_ids_with_role(&evaluator_ids, role::EVALUATOR)
        .await?
        .into_iter()
        .map(|u| (u.user_id, u))
        .collect();

    let views: Vec<TeamEvaluationView> = evaluations
        .iter()
        .map(|evaluation| {
            let evaluator = evaluators.get(&evaluation.evaluator_id);
            TeamEvaluationView {
                evaluator_name: evaluator
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| "Unknown Evaluator".to_string()),
                evaluator_email: evaluator.map(|e| e.email.clone()).unwrap_or_default(),
                total_score: decimal_to_f64(evaluation.total_score),
                submitted_at: evaluation.submitted_at,
                scores: evaluation.scores.0.clone(),
            }
        })
        .collect();

    let named_scores: Vec<(&str, &CriterionScores)> = views
        .iter()
        .map(|v| (v.evaluator_name.as_str(), &v.scores))
        .collect();
    let breakdown = build_breakdown(&named_scores);

    let status = if submission.evaluation_count == REQUIRED_EVALUATIONS {
        "completed".to_string()
    } else {
        "in_progress".to_string()
    };

    Ok(TeamScores {
        evaluations: views,
        average_score: submission.average_score.map(decimal_to_f64),
        evaluation_count: submission.evaluation_count,
        breakdown: Some(breakdown),
        status,
    })
}

/// Per-criterion averages and non-empty comments across the evaluations a
/// team has received.
fn build_breakdown(evaluations: &[(&str, &CriterionScores)]) -> Vec<CriterionBreakdown> {
    Criterion::ALL
        .iter()
        .map(|&criterion| {
            let sum: Decimal = evaluations
                .iter()
                .map(|(_, scores)| scores.get(criterion).score)
                .sum();
            let average = (sum / Decimal::from(evaluations.len() as i64)).round_dp(2);

            let comments: Vec<EvaluatorComment> = evaluations
                .iter()
                .filter(|(_, scores)| !scores.get(criterion).comment.trim().is_empty())
                .map(|(evaluator, scores)| EvaluatorComment {
                    evaluator: evaluator.to_string(),
                    comment: scores.get(criterion).comment.clone(),
                })
                .collect();

            CriterionBreakdown {
                criterion: criterion.key().to_string(),
                average_score: decimal_to_f64(average),
                comments,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CriterionScore;

    fn uniform_scores(value: i64, comment: &str) -> CriterionScores {
        let entry = || CriterionScore {
            score: Decimal::from(value),
            comment: comment.to_string(),
        };
        CriterionScores {
            relevance_to_learning: entry(),
            innovation_creativity: entry(),
            clarity_accessibility: entry(),
            depth: entry(),
            interactivity_engagement: entry(),
            use_of_technology: entry(),
            scalability_adaptability: entry(),
            ethical_standards: entry(),
            practical_application: entry(),
            video_quality: entry(),
        }
    }

    #[test]
    fn test_breakdown_averages_per_criterion() {
        let first = uniform_scores(4, "");
        let second = uniform_scores(5, "");
        let breakdown = build_breakdown(&[("alice", &first), ("bob", &second)]);

        assert_eq!(breakdown.len(), 10);
        assert!(breakdown.iter().all(|b| b.average_score == 4.5));
    }

    #[test]
    fn test_breakdown_keeps_only_non_empty_comments() {
        let with_comment = uniform_scores(3, "solid work");
        let without = uniform_scores(3, "   ");
        let breakdown = build_breakdown(&[("alice", &with_comment), ("bob", &without)]);

        for entry in &breakdown {
            assert_eq!(entry.comments.len(), 1);
            assert_eq!(entry.comments[0].evaluator, "alice");
        }
    }

    #[test]
    fn test_breakdown_is_keyed_by_wire_key() {
        let scores = uniform_scores(2, "");
        let breakdown = build_breakdown(&[("alice", &scores)]);

        assert_eq!(breakdown[0].criterion, "relevanceToLearning");
        assert_eq!(breakdown[9].criterion, "videoQuality");
    }
}
