use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::handlers::{get_scores, get_submission, save_submission};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:team_id/submission",
            put(save_submission).get(get_submission),
        )
        .route("/:team_id/scores", get(get_scores))
}
