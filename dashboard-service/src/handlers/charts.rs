//! Chart data handlers.
//!
//! Each handler decodes the filter selection from the raw query string,
//! calls exactly one method on the data source, and returns its JSON
//! verbatim. Any failure becomes the uniform 500 envelope; nothing
//! propagates past the handler boundary.

use crate::filters::FilterSelection;
use crate::services::metrics::{record_chart_error, record_chart_request};
use crate::startup::AppState;
use axum::{
    extract::{RawQuery, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

fn decode_filters(query: Option<String>) -> FilterSelection {
    FilterSelection::decode(query.as_deref().unwrap_or(""))
}

fn chart_error(chart: &'static str, message: &str, source: anyhow::Error) -> AppError {
    record_chart_error(chart);
    tracing::error!(chart = chart, error = ?source, "Chart data request failed");
    AppError::chart_data(message, source)
}

pub async fn activated_chart(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    record_chart_request("activated-chart");
    let selection = decode_filters(query);

    let data = state
        .charts
        .activated_chart(&selection)
        .await
        .map_err(|e| chart_error("activated-chart", "Error retrieving activated chart data", e))?;

    Ok(Json(data))
}

pub async fn data_alignment(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    record_chart_request("data-alignment");
    let selection = decode_filters(query);

    let data = state
        .charts
        .data_alignment(&selection)
        .await
        .map_err(|e| chart_error("data-alignment", "Error retrieving data alignment data", e))?;

    Ok(Json(data))
}

pub async fn nano_cluster(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    record_chart_request("nano-cluster");
    let selection = decode_filters(query);

    let data = state
        .charts
        .nano_cluster(&selection)
        .await
        .map_err(|e| chart_error("nano-cluster", "Error retrieving nano cluster data", e))?;

    Ok(Json(data))
}

pub async fn progress_curve(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    record_chart_request("progress-curve");
    let selection = decode_filters(query);

    let data = state
        .charts
        .progress_curve(&selection)
        .await
        .map_err(|e| chart_error("progress-curve", "Error retrieving progress curve data", e))?;

    Ok(Json(data))
}

pub async fn readiness_chart(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    record_chart_request("readiness-chart");
    let selection = decode_filters(query);

    let data = state
        .charts
        .readiness_chart(&selection)
        .await
        .map_err(|e| chart_error("readiness-chart", "Error retrieving readiness chart data", e))?;

    Ok(Json(data))
}

/// The one handler that takes no parameters.
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    record_chart_request("filter-options");

    let data = state
        .charts
        .filter_options()
        .await
        .map_err(|e| chart_error("filter-options", "Error retrieving filter options", e))?;

    Ok(Json(data))
}
