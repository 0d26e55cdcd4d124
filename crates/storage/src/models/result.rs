use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

/// One row of the published leaderboard. Serialized both into the snapshot's
/// JSONB column and straight out to API clients, so the field names are part
/// of the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub team_id: Uuid,
    pub team_name: String,
    pub average_score: f64,
    pub evaluation_count: i32,
}

/// The process-wide leaderboard snapshot. At most one row exists; publishing
/// replaces it in place.
#[derive(Debug, Clone, FromRow)]
pub struct ResultSnapshot {
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub published_by: Option<Uuid>,
    pub leaderboard: Json<Vec<LeaderboardEntry>>,
}
