//! Search-and-download workflow.
//!
//! One broad search, then one follow-up search per Lambda request ID, then
//! one file per request ID. Steps run strictly in sequence and the first
//! failure ends the run; files written before the failure are left in place.

#![warn(clippy::all, rust_2018_idioms)]

use std::path::{Component, Path, PathBuf};
use tracing::info;

use super::data_plane::cloudwatch_logs::{
    build_search_query, get_lambda_executions, save_execution_logs, LogSearchBackend,
    SearchOptions, SearchSummary,
};
use super::error::{LogSearchError, Result};

/// Search CloudWatch logs for a pattern and download matching Lambda execution logs
pub async fn search_logs(backend: &dyn LogSearchBackend, options: &SearchOptions) -> Result<SearchSummary> {
    let destination_dir = prepare_destination(&options.destination).await?;
    info!(
        "Searching {} for {:?}, writing to {}",
        options.log_group,
        options.search_pattern,
        destination_dir.display()
    );

    let query = build_search_query(options)?;
    let search_results = backend.filter_log_events(&query).await?;
    info!("Initial search matched {} events", search_results.events.len());

    let executions = get_lambda_executions(backend, &search_results, options).await?;

    for execution in &executions {
        let path = save_execution_logs(execution, &destination_dir).await?;
        trace_info!("Saved execution {} to {}", execution.request_id, path.display());
    }

    info!(
        "Processed {} Lambda executions into {}",
        executions.len(),
        destination_dir.display()
    );

    Ok(SearchSummary {
        count: executions.len(),
        directory: destination_dir,
    })
}

/// Create the destination (and parents) if needed and return it as an absolute path
async fn prepare_destination(destination: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(destination)
        .await
        .map_err(|e| LogSearchError::io(destination, e))?;

    let absolute = std::path::absolute(destination).map_err(|e| LogSearchError::io(destination, e))?;
    Ok(normalize_lexically(&absolute))
}

/// Drop `.` and fold `..` into its parent without touching the filesystem.
/// `..` at the root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
