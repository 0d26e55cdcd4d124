use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::handlers::{get_criteria, get_evaluation_status, get_leaderboard, publish_results};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .route("/criteria", get(get_criteria))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/results/publish", post(publish_results))
        .route("/evaluation-status", get(get_evaluation_status))
}
