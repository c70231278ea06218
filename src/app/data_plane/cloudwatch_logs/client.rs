//! CloudWatch Logs Search Backends
//!
//! Two ways of running a `filter-log-events` query:
//!
//! - [`AwsCliInvoker`] shells out to the AWS CLI, which handles credentials
//!   and pagination and prints the merged result as JSON.
//! - [`CloudWatchLogsClient`] calls the API through the AWS SDK and follows
//!   `nextToken` itself so callers see the same complete event list.

#![warn(clippy::all, rust_2018_idioms)]

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatchlogs as cloudwatchlogs;
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_types::region::Region;
use std::ffi::OsString;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::app::error::{LogSearchError, Result};

use super::query::FilterLogEventsQuery;
use super::types::{FilterLogEventsResponse, LogEvent};

/// Program used when no AWS CLI path is configured
pub const DEFAULT_AWS_CLI: &str = "aws";

/// Anything able to answer a `filter-log-events` query with the complete
/// list of matching events.
#[async_trait]
pub trait LogSearchBackend: Send + Sync {
    async fn filter_log_events(&self, query: &FilterLogEventsQuery) -> Result<FilterLogEventsResponse>;
}

/// Runs queries through the AWS CLI
#[derive(Debug, Clone)]
pub struct AwsCliInvoker {
    program: OsString,
    /// Arguments placed before `logs filter-log-events`
    leading_args: Vec<OsString>,
}

impl AwsCliInvoker {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_AWS_CLI)
    }

    /// Use a specific AWS CLI executable
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Insert arguments between the program and the query, e.g. for wrappers
    /// such as `aws-vault exec prod -- aws`
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn program_display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl Default for AwsCliInvoker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSearchBackend for AwsCliInvoker {
    async fn filter_log_events(&self, query: &FilterLogEventsQuery) -> Result<FilterLogEventsResponse> {
        let command_str = query.display_command(&self.program_display());
        info!("[CLI] Executing: {}", command_str);

        let start = Instant::now();
        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(query.to_cli_args())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| LogSearchError::Spawn {
                program: self.program_display(),
                source,
            })?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("[CLI] Command failed after {}ms: {}", duration_ms, stderr);
            return Err(LogSearchError::CommandFailed {
                command: command_str,
                status: output.status.code(),
                stderr,
            });
        }

        debug!(
            "[CLI] Command finished in {}ms with {} bytes of output",
            duration_ms,
            output.stdout.len()
        );

        let stdout = String::from_utf8_lossy(&output.stdout);
        let response = FilterLogEventsResponse::from_json(&stdout)
            .map_err(|e| LogSearchError::malformed(command_str.clone(), e))?;

        debug!("[CLI] Parsed {} events", response.events.len());
        Ok(response)
    }
}

/// Runs queries through the CloudWatch Logs API
#[derive(Clone, Debug)]
pub struct CloudWatchLogsClient {
    client: cloudwatchlogs::Client,
}

impl CloudWatchLogsClient {
    /// Wrap an existing SDK client
    pub fn new(client: cloudwatchlogs::Client) -> Self {
        Self { client }
    }

    /// Build a client from the default credential chain, optionally pinned to
    /// a named profile and region
    pub async fn from_profile(profile: Option<&str>, region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = profile {
            debug!("Using AWS profile: {}", profile);
            loader = loader.profile_name(profile);
        }

        if let Some(region) = region {
            debug!("Using AWS region: {}", region);
            loader = loader.region(Region::new(region.to_string()));
        }

        let config = loader.load().await;
        Self::new(cloudwatchlogs::Client::new(&config))
    }
}

#[async_trait]
impl LogSearchBackend for CloudWatchLogsClient {
    /// Profile and region are fixed when the client is built; the ones on
    /// the query are ignored here.
    async fn filter_log_events(&self, query: &FilterLogEventsQuery) -> Result<FilterLogEventsResponse> {
        info!(
            "[SDK] FilterLogEvents on {} with pattern {:?}",
            query.log_group_name, query.filter_pattern
        );

        let start = Instant::now();
        let mut events = Vec::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let response = self
                .client
                .filter_log_events()
                .log_group_name(&query.log_group_name)
                .filter_pattern(&query.filter_pattern)
                .set_start_time(query.start_time)
                .set_end_time(query.end_time)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| {
                    error!("[SDK] FilterLogEvents failed: {}", DisplayErrorContext(&e));
                    LogSearchError::Service {
                        operation: "FilterLogEvents".to_string(),
                        message: DisplayErrorContext(&e).to_string(),
                    }
                })?;
            pages += 1;

            for event in response.events.unwrap_or_default() {
                let timestamp = event.timestamp.ok_or_else(|| {
                    LogSearchError::malformed("FilterLogEvents", "event without timestamp")
                })?;
                let message = event.message.ok_or_else(|| {
                    LogSearchError::malformed("FilterLogEvents", "event without message")
                })?;
                events.push(LogEvent::new(timestamp, message));
            }

            match response.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        debug!(
            "[SDK] Collected {} events over {} pages in {}ms",
            events.len(),
            pages,
            start.elapsed().as_millis()
        );

        Ok(FilterLogEventsResponse::new(events))
    }
}
