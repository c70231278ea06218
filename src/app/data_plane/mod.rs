//! Data Plane Services Module
//!
//! AWS data plane integrations: code that reads data held inside AWS
//! resources rather than managing the resources themselves.
//!
//! ## Available Services
//!
//! - **CloudWatch Logs**: search a log group and pull complete Lambda
//!   invocation logs

pub mod cloudwatch_logs;

