use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Assignment lifecycle states. Stored as text, like every status column in
/// this schema.
pub mod status {
    pub const ACTIVE: &str = "active";
    pub const COMPLETED: &str = "completed";
}

/// The binding of exactly 3 approved evaluators to one team. One row per
/// team; reassignment replaces the whole evaluator set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub assignment_id: Uuid,
    pub team_id: Uuid,
    pub evaluator_ids: Vec<Uuid>,
    pub assigned_by: Uuid,
    pub assigned_at: DateTime<Utc>,
    pub status: String,
}
