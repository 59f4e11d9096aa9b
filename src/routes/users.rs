use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::AppState;
use crate::users::{navigation, NavItem, UserProfile};
use crate::InsightError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/users", get(list_handler))
        .route("/api/users/{key}", get(profile_handler))
        .route("/api/users/{key}/navigation", get(navigation_handler))
}

#[derive(Debug, Serialize)]
struct UserEntry {
    key: String,
    #[serde(flatten)]
    profile: UserProfile,
}

async fn list_handler(State(state): State<AppState>) -> Json<Vec<UserEntry>> {
    // ---
    let entries = state
        .users
        .iter()
        .map(|(key, profile)| UserEntry {
            key: key.to_string(),
            profile: profile.clone(),
        })
        .collect();
    Json(entries)
}

/// The profile in the layout the dashboard persists on login.
async fn profile_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, InsightError> {
    // ---
    Ok(Json(state.users.get(&key)?.clone()))
}

async fn navigation_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<NavItem>>, InsightError> {
    // ---
    let profile = state.users.get(&key)?;
    Ok(Json(navigation(profile)))
}
