use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::decimal_to_f64;
use crate::models::{CriterionScores, Submission};

/// Request payload for creating or replacing a team's video submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveSubmissionRequest {
    #[validate(custom(function = "validate_video_url"))]
    pub video_url: String,
}

fn validate_video_url(url: &str) -> Result<(), validator::ValidationError> {
    let is_http = url
        .split_once("://")
        .is_some_and(|(scheme, rest)| matches!(scheme, "http" | "https") && !rest.is_empty());

    if is_http {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_video_url"))
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
    pub team_id: Uuid,
    pub video_url: String,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub evaluation_count: i32,
    pub average_score: Option<f64>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            submission_id: submission.submission_id,
            team_id: submission.team_id,
            video_url: submission.video_url,
            submitted_at: submission.submitted_at,
            updated_at: submission.updated_at,
            evaluation_count: submission.evaluation_count,
            average_score: submission.average_score.map(decimal_to_f64),
        }
    }
}

/// One received evaluation, as shown back to the team that was scored.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamEvaluationView {
    pub evaluator_name: String,
    pub evaluator_email: String,
    pub total_score: f64,
    pub submitted_at: DateTime<Utc>,
    pub scores: CriterionScores,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorComment {
    pub evaluator: String,
    pub comment: String,
}

/// Per-criterion average and collected comments across the evaluations a
/// team has received so far.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriterionBreakdown {
    pub criterion: String,
    pub average_score: f64,
    pub comments: Vec<EvaluatorComment>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamScores {
    pub evaluations: Vec<TeamEvaluationView>,
    pub average_score: Option<f64>,
    pub evaluation_count: i32,
    pub breakdown: Option<Vec<CriterionBreakdown>>,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https_urls() {
        assert!(validate_video_url("https://videos.example.com/team-1").is_ok());
        assert!(validate_video_url("http://videos.example.com/team-1").is_ok());
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(validate_video_url("ftp://videos.example.com/team-1").is_err());
        assert!(validate_video_url("file:///tmp/video.mp4").is_err());
    }

    #[test]
    fn test_rejects_malformed_urls() {
        assert!(validate_video_url("not a url").is_err());
        assert!(validate_video_url("https://").is_err());
        assert!(validate_video_url("").is_err());
    }
}
