use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::handlers::{
    get_assignments, get_evaluations, get_progress, recompute_average, submit_evaluation,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:evaluator_id/assignments", get(get_assignments))
        .route("/:evaluator_id/evaluations", get(get_evaluations))
        .route("/:evaluator_id/progress", get(get_progress))
        .route(
            "/:evaluator_id/teams/:team_id/evaluation",
            post(submit_evaluation),
        )
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/teams/:team_id/recompute", post(recompute_average))
}
