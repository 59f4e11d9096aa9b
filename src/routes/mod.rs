//! Route gateway: merges every sub-router and binds the shared state.
//!
//! Each sibling module exports a `router()` and keeps its handlers and
//! request/response types private.

use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use crate::{Config, InsightError, PageDirectory, UserDirectory};

mod chat;
mod extract;
mod health;
mod metrics;
mod pages;
mod series;
mod users;

// ---

/// Immutable data shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    // ---
    pub config: Arc<Config>,
    pub pages: Arc<PageDirectory>,
    pub users: Arc<UserDirectory>,
}

impl AppState {
    // ---
    /// State backed by the built-in page copy and demo profiles.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            pages: Arc::new(PageDirectory::builtin()),
            users: Arc::new(UserDirectory::builtin()),
        }
    }

    /// A fresh RNG for one request, seeded when `SERIES_SEED` is set.
    fn rng(&self) -> StdRng {
        match self.config.series_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(series::router())
        .merge(metrics::router())
        .merge(chat::router())
        .merge(pages::router())
        .merge(users::router())
        .merge(health::router())
        .with_state(state)
}

impl IntoResponse for InsightError {
    fn into_response(self) -> axum::response::Response {
        // ---
        let status = match self {
            InsightError::EmptySeries | InsightError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            InsightError::UnknownPreset(_) | InsightError::UnknownUser(_) => StatusCode::NOT_FOUND,
        };
        tracing::warn!("Request failed ({}): {}", status, self);

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
