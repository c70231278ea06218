//! Core modules for the log processor.
//!
//! # Module Organization
//!
//! ## AWS Integration
//! - [`data_plane`] - CloudWatch Logs queries, request ID extraction and execution files
//!
//! ## Workflow
//! - [`log_processor`] - The search, extract, download sequence
//! - [`timestamp`] - Time boundary parsing and ISO-8601 formatting
//! - [`error`] - Failure taxonomy shared by every step
//!
//! ## Command Line
//! - [`cli`] - Argument definitions and backend selection
//! - [`settings`] - TOML defaults for profile, region and backend
//!
//! # Architecture
//!
//! [`log_processor::search_logs`] drives everything through a
//! [`data_plane::cloudwatch_logs::LogSearchBackend`], so the same workflow runs against the
//! AWS CLI, the AWS SDK, or an in-memory fake in tests.

pub mod cli;
pub mod data_plane;
pub mod error;
pub mod log_processor;
pub mod settings;
pub mod timestamp;

pub use error::{LogSearchError, Result};
pub use log_processor::search_logs;
