//! Data Transfer Objects
//!
//! Request and response types for the HTTP endpoints.
//! Query responses themselves are `engine::ExecutionResult`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================
// QUERY DTOs
// ============================================

/// Query string parameters for GET /graphql
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    /// Raw query document
    #[serde(default)]
    pub query: Option<String>,
}

/// POST /graphql body
///
/// The whole top-level object is kept: its null-valued entries drive the
/// sanitizer, not just `query`.
#[derive(Debug)]
pub struct QueryRequest {
    /// Raw query document
    pub query: String,
    /// Every top-level entry of the body, `query` included
    pub fields: Map<String, Value>,
}

impl QueryRequest {
    /// Decode a request body
    ///
    /// Returns a message suitable for a 400 response on failure.
    pub fn from_slice(body: &[u8]) -> Result<Self, String> {
        let fields: Map<String, Value> = serde_json::from_slice(body)
            .map_err(|e| format!("Could not read request body: {}", e))?;

        let query = fields
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| "Request body has no query string".to_string())?
            .to_string();

        Ok(Self { query, fields })
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Number of records served
    pub records: usize,
    /// Root query fields available
    pub fields: Vec<String>,
    /// Server start time
    pub started_at: DateTime<Utc>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_keeps_all_fields() {
        let req = QueryRequest::from_slice(br#"{"query": "{ x }", "ciudad": null, "n": 1}"#).unwrap();
        assert_eq!(req.query, "{ x }");
        assert_eq!(req.fields.len(), 3);
        assert!(req.fields["ciudad"].is_null());
    }

    #[test]
    fn test_query_request_errors() {
        assert!(QueryRequest::from_slice(b"not json").is_err());
        assert!(QueryRequest::from_slice(b"[1, 2]").is_err());
        assert!(QueryRequest::from_slice(br#"{"query": 5}"#).is_err());
        assert!(QueryRequest::from_slice(br#"{"variables": {}}"#).is_err());
    }
}
