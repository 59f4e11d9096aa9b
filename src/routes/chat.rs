use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{debug, info};

use super::extract::ApiJson;
use super::AppState;
use crate::chat::KeywordMatcher;
use crate::models::InsightResponse;
use crate::pages::PageId;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/chat", post(handler))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    question: String,
    /// Page the widget is open on; missing or unknown means home.
    #[serde(default)]
    page: Option<String>,
}

/// Answer a chat question after the configured typing delay.
///
/// Each request sleeps on its own; replies to overlapping requests may
/// complete in any order.
async fn handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Json<InsightResponse> {
    // ---
    let page = request
        .page
        .as_deref()
        .map(PageId::resolve)
        .unwrap_or(PageId::Home);
    debug!("POST /api/chat - page {}, question {:?}", page, request.question);

    let delay = state.config.chat_typing_delay;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let response = KeywordMatcher::new(&state.pages).respond(&request.question, page);
    info!("Chat reply on {}: {}", page, response.content());
    Json(response)
}
