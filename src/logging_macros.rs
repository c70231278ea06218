#![warn(clippy::all, rust_2018_idioms)]

/// Logging macros with `[file:module:line]` context.
///
/// `log_*` go through the `log` crate and reach the tracing subscriber via
/// the `tracing-log` bridge installed in `main`. `trace_*` go straight to
/// `tracing`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! trace_debug {
    ($($arg:tt)*) => {
        tracing::debug!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! trace_info {
    ($($arg:tt)*) => {
        tracing::info!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

/*
Log level guidelines:

DEBUG: per-query detail
- Rendered commands, byte counts, page counts
- Request IDs skipped because their follow-up query was empty
- Event counts per written file

INFO: milestones
- Command executed, initial match count, unique request IDs found
- Each execution file saved, final summary

WARN: suspicious but not fatal
- Matches found but none carried a RequestId (not a Lambda log group?)

ERROR: anything that ends the run
- Non-zero AWS CLI exit, SDK service errors, write failures

Example output:
  [src/app/log_processor.rs:aws_log_processor::app::log_processor:41] Saved execution 1111... to /tmp/out/...
*/
