use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Roles known to the identity service. Stored as text; the identity service
/// owns the enumeration, we only filter on it.
pub mod role {
    pub const TEAM: &str = "team";
    pub const EVALUATOR: &str = "evaluator";
    pub const ADMIN: &str = "admin";
}

/// A row from the identity directory. Read-only here: registration, login
/// and approval are handled by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub approved: bool,
    pub expertise: Option<String>,
    pub created_at: DateTime<Utc>,
}
