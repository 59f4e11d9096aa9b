use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::AppState;
use crate::chat::{KeywordMatcher, OpeningMessage};
use crate::pages::{PageId, PageInsights};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/pages/{page}/insights", get(insights_handler))
        .route("/api/pages/{page}/opening", get(opening_handler))
}

/// Unknown page tags get the home bundle rather than a 404.
async fn insights_handler(
    Path(page): Path<String>,
    State(state): State<AppState>,
) -> Json<PageInsights> {
    // ---
    Json(state.pages.lookup(&page).clone())
}

async fn opening_handler(
    Path(page): Path<String>,
    State(state): State<AppState>,
) -> Json<Vec<OpeningMessage>> {
    // ---
    let matcher = KeywordMatcher::new(&state.pages);
    Json(matcher.opening(PageId::resolve(&page)))
}
