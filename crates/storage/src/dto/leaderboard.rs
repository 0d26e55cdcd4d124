use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::LeaderboardEntry;

/// Request payload for publishing the final results.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishResultsRequest {
    pub admin_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    pub published_at: Option<DateTime<Utc>>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub total_teams: i64,
}

/// Public leaderboard read. "Not yet published" is a well-defined value,
/// not an error; clients branch on `published`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardView {
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaderboard: Option<Vec<LeaderboardEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_teams: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LeaderboardView {
    pub fn not_published() -> Self {
        Self {
            published: false,
            published_at: None,
            leaderboard: Some(Vec::new()),
            total_teams: None,
            message: Some("Results have not been published yet. Please check back later.".to_string()),
        }
    }
}
