//! HTTP request handlers for the quote costing API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_quote_costs;
use crate::error::EngineResult;
use crate::models::QuoteCosts;

use super::request::QuoteCostRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quotes/costs", post(quote_costs_handler))
        .with_state(state)
}

/// Handler for POST /quotes/costs endpoint.
///
/// Accepts the shifts of a quote and returns their costs, the weekly overtime
/// report and the broken-shift days.
async fn quote_costs_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteCostRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote cost request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::validation_error(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    match perform_costing(&request, &state) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                shifts_count = request.shifts.len(),
                total_price = %result.totals.total_price,
                duration_us = duration.as_micros(),
                "Quote costing completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Quote costing failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Resolves the rate table and settings for a request and runs the engine.
fn perform_costing(request: &QuoteCostRequest, state: &AppState) -> EngineResult<QuoteCosts> {
    let config = state.config();
    let effective_date = request
        .effective_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let rate_table = config.rate_table(effective_date)?;
    let settings = request.resolve_settings(config.settings())?;

    compute_quote_costs(&request.shifts, rate_table, &settings, config.allowances())
}
