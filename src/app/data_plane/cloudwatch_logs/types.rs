//! CloudWatch Logs Data Types
//!
//! Search inputs, service responses and the per-execution grouping built from them.

#![warn(clippy::all, rust_2018_idioms)]

use serde::Deserialize;
use std::path::PathBuf;

/// User-facing search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// CloudWatch log group name
    pub log_group: String,
    /// Filter pattern, passed to the service verbatim
    pub search_pattern: String,
    /// Directory receiving one file per execution
    pub destination: PathBuf,
    /// Start bound (ISO-8601 or Unix milliseconds)
    pub from: Option<String>,
    /// End bound (ISO-8601 or Unix milliseconds)
    pub to: Option<String>,
    /// Named AWS profile
    pub profile: Option<String>,
    /// AWS region
    pub region: Option<String>,
}

impl SearchOptions {
    pub fn new(
        log_group: impl Into<String>,
        search_pattern: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            log_group: log_group.into(),
            search_pattern: search_pattern.into(),
            destination: destination.into(),
            from: None,
            to: None,
            profile: None,
            region: None,
        }
    }

    /// Set start bound
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set end bound
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Set AWS profile
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set AWS region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// A single log event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogEvent {
    /// Event timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Log message content
    pub message: String,
}

impl LogEvent {
    pub fn new(timestamp: i64, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }
}

/// Events returned by one `filter-log-events` call.
///
/// Matches the AWS CLI JSON output; fields other than the ones below
/// (`searchedLogStreams`, `logStreamName`, `eventId`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterLogEventsResponse {
    #[serde(default)]
    pub events: Vec<LogEvent>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl FilterLogEventsResponse {
    pub fn new(events: Vec<LogEvent>) -> Self {
        Self {
            events,
            next_token: None,
        }
    }

    /// Parse the JSON body printed by `aws logs filter-log-events`
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Every log line written by one Lambda invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaExecution {
    pub request_id: String,
    /// Timestamp of the first event
    pub start_time: i64,
    pub events: Vec<LogEvent>,
}

impl LambdaExecution {
    /// Group events under a request ID. Returns `None` when there are no
    /// events, since an execution without logs cannot be dated.
    pub fn from_events(request_id: impl Into<String>, events: Vec<LogEvent>) -> Option<Self> {
        let start_time = events.first()?.timestamp;
        Some(Self {
            request_id: request_id.into(),
            start_time,
            events,
        })
    }
}

/// Outcome of a completed search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSummary {
    /// Number of execution files written
    pub count: usize,
    /// Absolute destination directory
    pub directory: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_options_builder() {
        let options = SearchOptions::new("/aws/lambda/orders", "ERROR", "./out")
            .with_from("1700000000000")
            .with_region("eu-west-1");

        assert_eq!(options.log_group, "/aws/lambda/orders");
        assert_eq!(options.from.as_deref(), Some("1700000000000"));
        assert_eq!(options.region.as_deref(), Some("eu-west-1"));
        assert!(options.to.is_none());
        assert!(options.profile.is_none());
    }

    #[test]
    fn test_response_from_cli_json() {
        let raw = r#"{
            "events": [
                {
                    "logStreamName": "2024/01/15/[$LATEST]abc",
                    "timestamp": 1000,
                    "message": "START RequestId: x",
                    "ingestionTime": 1005,
                    "eventId": "3791"
                }
            ],
            "searchedLogStreams": [],
            "nextToken": "tok"
        }"#;

        let response = FilterLogEventsResponse::from_json(raw).unwrap();
        assert_eq!(response.events, vec![LogEvent::new(1000, "START RequestId: x")]);
        assert_eq!(response.next_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_response_without_events_is_empty() {
        let response = FilterLogEventsResponse::from_json("{}").unwrap();
        assert!(response.events.is_empty());
        assert!(response.next_token.is_none());
    }

    #[test]
    fn test_response_rejects_event_without_message() {
        let raw = r#"{"events":[{"timestamp":1000}]}"#;
        assert!(FilterLogEventsResponse::from_json(raw).is_err());
    }

    #[test]
    fn test_execution_requires_events() {
        assert!(LambdaExecution::from_events("id", Vec::new()).is_none());

        let execution = LambdaExecution::from_events(
            "id",
            vec![LogEvent::new(42, "START"), LogEvent::new(40, "late")],
        )
        .unwrap();
        assert_eq!(execution.start_time, 42);
        assert_eq!(execution.events.len(), 2);
    }
}
