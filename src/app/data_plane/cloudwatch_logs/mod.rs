//! CloudWatch Logs Integration Module
//!
//! Searches a log group, groups the matches by Lambda invocation and writes
//! one file per invocation.
//!
//! ## Features
//!
//! - Query building with optional time range, profile and region
//! - AWS CLI and AWS SDK search backends behind [`LogSearchBackend`]
//! - Request ID extraction with first-seen ordering
//! - Per-execution log files
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aws_log_processor::app::data_plane::cloudwatch_logs::{
//!     build_search_query, AwsCliInvoker, LogSearchBackend, SearchOptions,
//! };
//!
//! # async fn example() -> aws_log_processor::app::error::Result<()> {
//! let options = SearchOptions::new("/aws/lambda/my-function", "ERROR", "./logs")
//!     .with_from("2024-01-15T00:00:00Z")
//!     .with_region("us-east-1");
//!
//! let response = AwsCliInvoker::new()
//!     .filter_log_events(&build_search_query(&options)?)
//!     .await?;
//!
//! for event in response.events {
//!     println!("{}: {}", event.timestamp, event.message);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod client;
pub mod extractor;
pub mod query;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use client::{AwsCliInvoker, CloudWatchLogsClient, LogSearchBackend, DEFAULT_AWS_CLI};
pub use extractor::{extract_request_ids, find_request_id, get_lambda_executions};
pub use query::{build_request_query, build_search_query, FilterLogEventsQuery};
pub use types::{FilterLogEventsResponse, LambdaExecution, LogEvent, SearchOptions, SearchSummary};
pub use writer::{execution_file_name, format_execution, save_execution_logs};
