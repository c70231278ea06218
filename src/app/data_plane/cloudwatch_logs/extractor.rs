//! Lambda Execution Extraction
//!
//! Finds the Lambda request IDs mentioned by a first-pass search and pulls
//! the complete log of each invocation.

#![warn(clippy::all, rust_2018_idioms)]

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::app::error::Result;

use super::client::LogSearchBackend;
use super::query::build_request_query;
use super::types::{FilterLogEventsResponse, LambdaExecution, SearchOptions};

static REQUEST_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"RequestId: ([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})")
        .unwrap()
});

/// Request ID mentioned in a log message, if any. Only the first occurrence counts.
pub fn find_request_id(message: &str) -> Option<&str> {
    REQUEST_ID_PATTERN
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Distinct request IDs in the order they were first seen
pub fn extract_request_ids(response: &FilterLogEventsResponse) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut request_ids = Vec::new();

    for event in &response.events {
        if let Some(request_id) = find_request_id(&event.message) {
            if seen.insert(request_id) {
                request_ids.push(request_id.to_string());
            }
        }
    }

    request_ids
}

/// Fetch every log line for each request ID found in `search_results`.
///
/// Queries run one after another. Request IDs whose follow-up query comes
/// back empty are skipped.
pub async fn get_lambda_executions(
    backend: &dyn LogSearchBackend,
    search_results: &FilterLogEventsResponse,
    options: &SearchOptions,
) -> Result<Vec<LambdaExecution>> {
    let request_ids = extract_request_ids(search_results);
    info!(
        "Found {} unique request IDs in {} matching events",
        request_ids.len(),
        search_results.events.len()
    );
    if request_ids.is_empty() && !search_results.events.is_empty() {
        log_warn!(
            "{} events matched {:?} but none mention a RequestId",
            search_results.events.len(),
            options.search_pattern
        );
    }

    let mut executions = Vec::with_capacity(request_ids.len());

    for request_id in request_ids {
        let query = build_request_query(&request_id, options)?;
        let response = backend.filter_log_events(&query).await?;

        match LambdaExecution::from_events(request_id.as_str(), response.events) {
            Some(execution) => {
                debug!(
                    "Request {} has {} events",
                    execution.request_id,
                    execution.events.len()
                );
                executions.push(execution);
            }
            None => {
                trace_debug!("No events left for request {}, skipping", request_id);
            }
        }
    }

    Ok(executions)
}
