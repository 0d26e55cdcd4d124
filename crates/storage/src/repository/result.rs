use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{LeaderboardEntry, ResultSnapshot};

/// Repository for the singleton leaderboard snapshot. The fixed primary key
/// means there is exactly one row to read and exactly one to replace.
pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<Option<ResultSnapshot>> {
        let snapshot = sqlx::query_as::<_, ResultSnapshot>(
            "SELECT published, published_at, published_by, leaderboard FROM results WHERE id",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(snapshot)
    }

    /// Replaces the snapshot wholesale. Concurrent publishes are
    /// last-write-wins on this single row.
    pub async fn replace(
        &self,
        admin_id: Uuid,
        leaderboard: &[LeaderboardEntry],
    ) -> Result<ResultSnapshot> {
        let snapshot = sqlx::query_as::<_, ResultSnapshot>(
            r#"
            INSERT INTO results (id, published, published_at, published_by, leaderboard)
            VALUES (TRUE, TRUE, now(), $1, $2)
            ON CONFLICT (id) DO UPDATE
            SET published = EXCLUDED.published,
                published_at = EXCLUDED.published_at,
                published_by = EXCLUDED.published_by,
                leaderboard = EXCLUDED.leaderboard
            RETURNING published, published_at, published_by, leaderboard
            "#,
        )
        .bind(admin_id)
        .bind(Json(leaderboard))
        .fetch_one(self.pool)
        .await?;

        Ok(snapshot)
    }
}
