//! HTTP route handlers.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::assemble::Payload;
use crate::cache::DatasetKind;

use super::dto::*;
use super::state::AppState;

const GEOJSON_CONTENT_TYPE: &str = "application/geo+json";
const CACHE_CONTROL: &str = "public, max-age=300";
const FEATURE_COUNT: HeaderName = HeaderName::from_static("x-feature-count");
const FILTER_YEAR: HeaderName = HeaderName::from_static("x-filter-year");

/// Create the application router.
///
/// Anything not matched by an API route is served from `static_dir`.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/railroads", get(railroads))
        .route("/api/stations", get(stations))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Rail sections, optionally filtered by `?date=YYYY-MM-DD`.
async fn railroads(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let query = DatasetQuery::from_pairs(pairs);
    serve_dataset(&state, DatasetKind::Railroads, &query).await
}

/// Stations, optionally filtered by `?date=YYYY-MM-DD`.
///
/// A filtered request only returns stations on lines that are themselves
/// active in the rail dataset that year.
async fn stations(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let query = DatasetQuery::from_pairs(pairs);
    serve_dataset(&state, DatasetKind::Stations, &query).await
}

async fn serve_dataset(
    state: &AppState,
    kind: DatasetKind,
    query: &DatasetQuery,
) -> Result<Response, AppError> {
    let year = query.filter_year().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let payload = match year {
        None => Arc::new(state.datasets.unfiltered(kind)),
        Some(year) => state.datasets.filtered(kind, year).await.map_err(|e| {
            error!(dataset = %kind, year, error = %e, "failed to build filtered dataset");
            AppError::Internal {
                message: "failed to build filtered dataset".to_string(),
            }
        })?,
    };

    Ok(geojson_response(&payload))
}

/// Build a GeoJSON response carrying the feature count (and year) headers.
fn geojson_response(payload: &Payload) -> Response {
    let mut response = payload.body.clone().into_response();
    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(GEOJSON_CONTENT_TYPE),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    headers.insert(FEATURE_COUNT, HeaderValue::from(payload.feature_count));
    if let Some(year) = payload.year {
        headers.insert(FILTER_YEAR, HeaderValue::from(year));
    }

    response
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
