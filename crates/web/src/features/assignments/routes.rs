use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::handlers::{assign_evaluators, get_workload, list_assignments};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assignments", post(assign_evaluators).get(list_assignments))
        .route("/assignments/workload", get(get_workload))
}
