//! Execution log files.
//!
//! Each Lambda execution becomes `<start>_<request-id>.log`, where `<start>`
//! is the ISO-8601 start time with colons swapped for hyphens so the name is
//! valid on every filesystem.

#![warn(clippy::all, rust_2018_idioms)]

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::error::{LogSearchError, Result};
use crate::app::timestamp::format_iso8601;

use super::types::LambdaExecution;

pub fn execution_file_name(execution: &LambdaExecution) -> Result<String> {
    let started = format_iso8601(execution.start_time)?.replace(':', "-");
    Ok(format!("{}_{}.log", started, execution.request_id))
}

/// One `[timestamp] message` line per event, no trailing newline
pub fn format_execution(execution: &LambdaExecution) -> Result<String> {
    let lines = execution
        .events
        .iter()
        .map(|event| -> Result<String> {
            Ok(format!("[{}] {}", format_iso8601(event.timestamp)?, event.message))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

/// Write an execution into `destination_dir`, replacing any previous file of
/// the same name. Returns the path written.
pub async fn save_execution_logs(execution: &LambdaExecution, destination_dir: &Path) -> Result<PathBuf> {
    let file_path = destination_dir.join(execution_file_name(execution)?);
    let content = format_execution(execution)?;

    tokio::fs::write(&file_path, content.as_bytes())
        .await
        .map_err(|e| LogSearchError::io(&file_path, e))?;

    debug!(
        "Wrote {} events to {}",
        execution.events.len(),
        file_path.display()
    );
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data_plane::cloudwatch_logs::types::LogEvent;
    use pretty_assertions::assert_eq;

    fn execution() -> LambdaExecution {
        LambdaExecution::from_events(
            "11111111-1111-1111-1111-111111111111",
            vec![LogEvent::new(1000, "START"), LogEvent::new(1002, "END")],
        )
        .unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            execution_file_name(&execution()).unwrap(),
            "1970-01-01T00-00-01.000Z_11111111-1111-1111-1111-111111111111.log"
        );
    }

    #[test]
    fn test_format_has_no_trailing_newline() {
        assert_eq!(
            format_execution(&execution()).unwrap(),
            "[1970-01-01T00:00:01.000Z] START\n[1970-01-01T00:00:01.002Z] END"
        );
    }

    #[test]
    fn test_multiline_message_kept_verbatim() {
        let execution = LambdaExecution::from_events(
            "id",
            vec![LogEvent::new(0, "Traceback:\n  line 1\n")],
        )
        .unwrap();

        assert_eq!(
            format_execution(&execution).unwrap(),
            "[1970-01-01T00:00:00.000Z] Traceback:\n  line 1\n"
        );
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(execution_file_name(&execution()).unwrap());
        std::fs::write(&path, "stale content that is longer than the new one").unwrap();

        let written = save_execution_logs(&execution(), dir.path()).await.unwrap();

        assert_eq!(written, path);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[1970-01-01T00:00:01.000Z] START\n[1970-01-01T00:00:01.002Z] END"
        );
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = save_execution_logs(&execution(), &missing).await.unwrap_err();
        assert!(matches!(err, LogSearchError::Io { .. }));
    }
}
