use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A team's video submission. evaluation_count and average_score are
/// denormalized from the evaluations table; average_score stays null until
/// the third evaluation lands.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub submission_id: Uuid,
    pub team_id: Uuid,
    pub video_url: String,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub evaluation_count: i32,
    pub average_score: Option<Decimal>,
}
