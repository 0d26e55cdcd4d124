use axum::extract::FromRef;
use storage::Database;

use crate::middleware::auth::ApiKeys;

/// Application state shared across handlers. Handlers extract the slice they
/// need via FromRef.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub api_keys: ApiKeys,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for ApiKeys {
    fn from_ref(state: &AppState) -> Self {
        state.api_keys.clone()
    }
}
