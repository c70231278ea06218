//! AWS Log Processor - per-invocation Lambda logs from CloudWatch
//!
//! Searches a CloudWatch log group for a pattern, collects the Lambda
//! `RequestId`s mentioned by the matching lines, fetches every log line of
//! each of those invocations and writes one file per invocation.
//!
//! # Core Features
//!
//! - **Pattern Search**: any CloudWatch filter pattern, optionally bounded in time
//! - **Invocation Grouping**: one complete log per `RequestId`, not a flat stream
//! - **Two Backends**: the AWS CLI (default) or the AWS SDK
//! - **Stable Output**: `<start-time>_<request-id>.log` files, one line per event
//!
//! # Getting Started
//!
//! ```rust,no_run
//! use aws_log_processor::app::data_plane::cloudwatch_logs::{AwsCliInvoker, SearchOptions};
//! use aws_log_processor::app::search_logs;
//!
//! # async fn example() -> aws_log_processor::app::Result<()> {
//! let options = SearchOptions::new("/aws/lambda/checkout", "Task timed out", "./timeouts")
//!     .with_from("2024-01-15T00:00:00Z")
//!     .with_profile("prod");
//!
//! let summary = search_logs(&AwsCliInvoker::new(), &options).await?;
//! println!("{} executions in {}", summary.count, summary.directory.display());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod app;
