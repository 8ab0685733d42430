//! API route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::{last_year_cutoff, Database};
use crate::types::{
    ErrorResponse, PrecipitationResponse, StationsResponse, TemperatureSummary, TobsResponse,
};

/// Route listing served at `/`
pub const ROUTE_LISTING: &str = "Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/start<br/>\
/api/v1.0/start/end";

/// Application state shared across handlers.
pub struct AppState {
    pub db: Database,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Query failed: {:#}", err);
        Self::internal(format!("{:#}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/:start", get(summary_from))
        .route("/api/v1.0/:start/:end", get(summary_between))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// List all available api routes.
pub async fn welcome() -> Html<&'static str> {
    Html(ROUTE_LISTING)
}

/// Date to temperature observation for the last year of data.
///
/// Later rows for the same date overwrite earlier ones.
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecipitationResponse>, ApiError> {
    let cutoff = last_year_cutoff();
    let observations = state
        .db
        .run(move |repo| repo.observations_after(&cutoff))
        .await?;

    let by_date: PrecipitationResponse = observations
        .into_iter()
        .map(|obs| (obs.date, obs.tobs))
        .collect();

    tracing::debug!("precipitation: {} dates", by_date.len());
    Ok(Json(by_date))
}

/// Station names from the dataset.
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StationsResponse>, ApiError> {
    let names = state.db.run(|repo| repo.station_names()).await?;

    tracing::debug!("stations: {} names", names.len());
    Ok(Json(names))
}

/// Temperature observations for the last year of data.
pub async fn tobs(State(state): State<Arc<AppState>>) -> Result<Json<TobsResponse>, ApiError> {
    let cutoff = last_year_cutoff();
    let temps = state
        .db
        .run(move |repo| repo.temperatures_after(&cutoff))
        .await?;

    tracing::debug!("tobs: {} observations", temps.len());
    Ok(Json(temps))
}

/// TMIN, TAVG and TMAX for all dates after `start`.
pub async fn summary_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureSummary>>, ApiError> {
    tracing::debug!("summary from {}", start);
    let summary = state
        .db
        .run(move |repo| repo.temperature_summary(&start, None))
        .await?;

    Ok(Json(vec![summary]))
}

/// TMIN, TAVG and TMAX for all dates strictly between `start` and `end`.
pub async fn summary_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureSummary>>, ApiError> {
    tracing::debug!("summary between {} and {}", start, end);
    let summary = state
        .db
        .run(move |repo| repo.temperature_summary(&start, Some(end.as_str())))
        .await?;

    Ok(Json(vec![summary]))
}
