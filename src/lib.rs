//! Mock analytics and insight engine for the facility-management dashboard.
//!
//! Modules follow the Explicit Module Boundary Pattern (EMBP): each concern
//! lives in its own module, and the HTTP surface is assembled by the `routes`
//! gateway so `main.rs` only sees [`routes::router`].
//!
//! - [`synth`] fabricates date-anchored series from an injected RNG
//! - [`classify`] annotates a series with anomaly and threshold status
//! - [`chat`] routes free-text questions to canned analyses
//! - [`pages`] holds the per-page greeting/highlight/recommendation copy
//! - [`users`] holds the demo profiles and role-gated navigation

pub mod chat;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod presets;
pub mod routes;
pub mod synth;
pub mod users;

pub use config::Config;
pub use error::InsightError;
pub use models::{AnnotatedPoint, Deviation, InsightResponse, PointStatus, TimeSeriesPoint};
pub use pages::{PageDirectory, PageId};
pub use routes::{router, AppState};
pub use users::{UserDirectory, UserProfile};
