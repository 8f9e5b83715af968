// Axum API Server Module
//
// Purpose: survey web UI (Askama + HTMX) and JSON API over the framework
// catalog and scoring engine. Holds the single in-process response store.

#[cfg(feature = "api")]
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use std::sync::{Arc, RwLock};

#[cfg(feature = "api")]
use crate::catalog::Catalog;

#[cfg(feature = "api")]
use crate::responses::{ParseRatingError, Rating, ResponseMap};

#[cfg(feature = "api")]
use crate::scorer::{compute_gaps, score_framework, score_survey, FrameworkScore, SurveyResults};

#[cfg(feature = "api")]
use crate::web::handlers::pages;

// ============================================================================
// Application State
// ============================================================================

/// Shared server state: the immutable catalog and the one in-process
/// response store (per-session persistence and multi-user isolation are
/// out of scope).
#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub responses: Arc<RwLock<ResponseMap>>,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new() -> Self {
        let catalog = Arc::new(Catalog::builtin());
        tracing::info!(
            "Catalog loaded: {} frameworks, {} questions",
            catalog.frameworks().len(),
            catalog.question_count()
        );

        Self {
            catalog,
            responses: Arc::new(RwLock::new(ResponseMap::new())),
        }
    }
}

#[cfg(feature = "api")]
impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Survey pages (HTML)
        .route("/", get(pages::home_page))
        .route("/survey/:framework", get(pages::survey_page))
        .route("/survey/:framework/respond", post(pages::respond))
        .route("/summary", get(pages::summary_page))

        // Catalog and score endpoints (JSON API)
        .route("/api/catalog", get(get_catalog))
        .route("/api/scores", get(get_scores))
        .route("/api/scores/:framework", get(get_framework_score))
        .route("/api/gaps", get(get_gaps))
        .route("/api/responses", post(set_response).delete(reset_responses))

        // Static assets (stylesheet)
        .nest_service("/static", ServeDir::new("static"))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// JSON Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn get_catalog(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "frameworks": state.catalog.frameworks()
    }))
}

#[cfg(feature = "api")]
async fn get_scores(State(state): State<AppState>) -> Result<Json<SurveyResults>, AppError> {
    let responses = read_responses(&state)?;
    Ok(Json(score_survey(&state.catalog, &responses)))
}

#[cfg(feature = "api")]
async fn get_framework_score(
    Path(framework): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<FrameworkScore>, AppError> {
    let (idx, fw) = state
        .catalog
        .framework_by_slug(&framework)
        .ok_or_else(|| AppError::NotFound(format!("Unknown framework: {}", framework)))?;

    let responses = read_responses(&state)?;
    Ok(Json(score_framework(fw, idx, &responses)))
}

#[cfg(feature = "api")]
async fn get_gaps(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let responses = read_responses(&state)?;
    let gaps = compute_gaps(&state.catalog, &responses);

    Ok(Json(serde_json::json!({
        "count": gaps.len(),
        "items": gaps
    })))
}

#[cfg(feature = "api")]
async fn set_response(
    State(state): State<AppState>,
    Json(req): Json<SetResponseRequest>,
) -> Result<Json<SurveyResults>, AppError> {
    let id = state
        .catalog
        .resolve_key(&req.key)
        .ok_or_else(|| AppError::NotFound(format!("Unknown question key: {}", req.key)))?;

    // Malformed rating labels are rejected here; the scorer only ever sees
    // the typed enum.
    let rating: Rating = req
        .rating
        .parse()
        .map_err(|e: ParseRatingError| AppError::Unprocessable(e.to_string()))?;

    let mut responses = write_responses(&state)?;
    responses.set(id, rating);
    tracing::debug!("Recorded '{}' for {}", rating, req.key);

    Ok(Json(score_survey(&state.catalog, &responses)))
}

#[cfg(feature = "api")]
async fn reset_responses(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let mut responses = write_responses(&state)?;
    let cleared = responses.len();
    responses.clear();
    tracing::info!("Survey reset ({} responses cleared)", cleared);

    Ok(Json(serde_json::json!({
        "cleared": cleared
    })))
}

// ============================================================================
// Request Types
// ============================================================================

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct SetResponseRequest {
    key: String,
    rating: String,
}

// ============================================================================
// Lock Helpers
// ============================================================================

#[cfg(feature = "api")]
pub(crate) fn read_responses(
    state: &AppState,
) -> Result<std::sync::RwLockReadGuard<'_, ResponseMap>, AppError> {
    state
        .responses
        .read()
        .map_err(|_| AppError::Internal("response store lock poisoned".to_string()))
}

#[cfg(feature = "api")]
pub(crate) fn write_responses(
    state: &AppState,
) -> Result<std::sync::RwLockWriteGuard<'_, ResponseMap>, AppError> {
    state
        .responses
        .write()
        .map_err(|_| AppError::Internal("response store lock poisoned".to_string()))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
pub enum AppError {
    Internal(String),
    NotFound(String),
    Unprocessable(String),
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
