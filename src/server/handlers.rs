use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::compare::{compare_with, resolver_for, CompareError};
use crate::resolve::Strategy;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/health ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ─── GET /api/compare ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CompareQuery {
    pub city1: Option<String>,
    pub country1: Option<String>,
    pub city2: Option<String>,
    pub country2: Option<String>,
    /// "csv" (default) or "api".
    pub method: Option<String>,
}

#[derive(Serialize)]
pub struct CompareResponse {
    pub distance_km: f64,
    pub method: String,
}

pub async fn compare(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareQuery>,
) -> Result<Json<CompareResponse>, ApiError> {
    let city1 = required(&params.city1, "city1")?;
    let country1 = required(&params.country1, "country1")?;
    let city2 = required(&params.city2, "city2")?;
    let country2 = required(&params.country2, "country2")?;

    let strategy: Strategy = params
        .method
        .as_deref()
        .unwrap_or("csv")
        .parse()
        .map_err(|e: String| api_error(StatusCode::BAD_REQUEST, e))?;

    let outcome = match strategy {
        Strategy::Csv => {
            let mut resolver = state.csv.lock().unwrap();
            compare_with(&mut *resolver, city1, country1, city2, country2)
        }
        Strategy::Api => {
            let mut resolver = resolver_for(strategy, &state.config);
            compare_with(resolver.as_mut(), city1, country1, city2, country2)
        }
    };

    match outcome {
        Ok(distance_km) => Ok(Json(CompareResponse {
            distance_km,
            method: strategy.to_string(),
        })),
        Err(CompareError::Unresolved) => Err(api_error(
            StatusCode::NOT_FOUND,
            CompareError::Unresolved.to_string(),
        )),
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Missing '{}' parameter", name),
        )),
    }
}
