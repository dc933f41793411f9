//! Query Routes
//!
//! - GET /graphql?query=... - Execute a query as given
//! - POST /graphql - Strip null-valued arguments from the query, then execute
//! - OPTIONS /graphql - Preflight answer
//!
//! Execution problems are reported inside the response body with status 200;
//! only an unusable request body is a 400.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::{QueryParams, QueryRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::engine::ExecutionResult;
use crate::query::sanitize_query;

/// GET /graphql
pub async fn execute_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Response> {
    let query = params.query.unwrap_or_default();
    let result = state.engine.execute(&query);
    format_response(&state, &result)
}

/// POST /graphql
///
/// Every top-level body entry whose value is `null` has its argument clause
/// cut from the query text before execution.
pub async fn execute_post(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<Response> {
    let req = QueryRequest::from_slice(&body).map_err(ApiError::Validation)?;

    let query = sanitize_query(&req.query, &req.fields);
    if query != req.query {
        tracing::debug!(original = %req.query, sanitized = %query, "Sanitized query");
    }

    let result = state.engine.execute(&query);
    format_response(&state, &result)
}

/// OPTIONS /graphql
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Serialize an execution result as JSON
fn format_response(state: &AppState, result: &ExecutionResult) -> ApiResult<Response> {
    let serialized = if state.config.pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    let body = serialized
        .map_err(|e| ApiError::Internal(format!("Could not format JSON response: {}", e)))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
