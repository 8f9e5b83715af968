//! Readiness Scorer
//!
//! Self-assessment survey over governance/risk frameworks with weighted
//! readiness scoring.
//!
//! The crate is split into a pure core and an optional web surface:
//! - `utils/`: Key normalization (slug) helpers
//! - `catalog`: Static framework → section → question taxonomy
//! - `responses`: Ratings and the per-session response map
//! - `scorer`: Pure scoring functions (sections, frameworks, aggregate, gaps)
//! - `api_server` / `web` (feature `api`): Axum survey UI and JSON API

pub mod utils;
pub mod catalog;
pub mod responses;
pub mod scorer;

pub mod api_server;
#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, Framework, Section};
pub use responses::{ParseRatingError, QuestionId, Rating, ResponseMap, MAX_WEIGHT};
pub use scorer::{
    aggregate_score, compute_gaps, score_framework, score_survey, FrameworkScore, GapItem,
    SectionScore, SurveyResults,
};
pub use utils::{question_key, slugify};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
