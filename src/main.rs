#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;

use aws_log_processor::app::cli::{Cli, Commands};
use aws_log_processor::app::search_logs;
use aws_log_processor::app::settings::{Settings, APP_NAME};
use aws_log_processor::log_error;

const DEFAULT_LOG_FILTER: &str =
    "aws_log_processor=info,aws_config=warn,aws_sigv4=warn,aws_smithy_runtime=warn,aws_smithy_runtime_api=warn,hyper=warn";

fn log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "", APP_NAME).map(|dirs| dirs.data_dir().join("logs"))
}

/// File logging under the platform data directory, plus stderr when verbose.
/// Returns the log file path when one could be opened.
fn init_logging(verbose: bool) -> Option<PathBuf> {
    let log_file = log_dir().and_then(|dir| {
        std::fs::create_dir_all(&dir).ok()?;
        let path = dir.join(format!("{}.log", APP_NAME));
        let file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .ok()?;

        // Search patterns and log lines can be sensitive: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)) {
                eprintln!("[SECURITY] Failed to set log file permissions: {}", e);
            }
        }

        Some((path, file))
    });

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let (log_path, file_layer) = match log_file {
        Some((path, file)) => (
            Some(path),
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false), // No ANSI colors in file
            ),
        ),
        None => (None, None),
    };

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return None;
    }

    // Bridge log crate events to tracing (log_* macros, AWS SDK internals)
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize log-to-tracing bridge: {}", e);
    }

    tracing::info!("Logging initialized to: {:?}", log_path);
    log_path
}

fn setup_panic_handler() {
    // Installed before logging so early panics still reach crash.log
    std::panic::set_hook(Box::new(|panic_info| {
        let crash_msg = format!(
            "{} crashed!\nPanic occurred at: {}\nDetails: {}\nBacktrace:\n{:?}\n",
            APP_NAME,
            panic_info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string()),
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
                .unwrap_or("unknown panic"),
            std::backtrace::Backtrace::force_capture()
        );

        eprintln!("\n{}", crash_msg);

        if let Some(dir) = log_dir() {
            let _ = std::fs::create_dir_all(&dir);
            let crash_log_path = dir.join("crash.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&crash_log_path)
            {
                use std::io::Write;
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "\n=== CRASH at {} ===\n{}", timestamp, crash_msg);
                eprintln!("Crash log written to: {:?}", crash_log_path);
            }
        }
    }));
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    let Commands::Search(args) = cli.command;
    let resolved = args.resolve(&settings);
    tracing::info!(
        "search: log_group={} backend={} profile={:?} region={:?}",
        resolved.options.log_group,
        resolved.backend,
        resolved.options.profile,
        resolved.options.region
    );

    println!(
        "Searching CloudWatch logs for pattern: {}",
        resolved.options.search_pattern
    );
    println!("Log group: {}", resolved.options.log_group);

    // Queries run one at a time, a single-threaded runtime is all we need
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let summary = runtime.block_on(async {
        let backend = resolved.build_backend().await;
        search_logs(backend.as_ref(), &resolved.options).await
    })?;

    println!("Successfully processed {} Lambda executions", summary.count);
    println!("Log files saved to: {}", summary.directory.display());
    Ok(())
}

fn main() -> ExitCode {
    setup_panic_handler();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("Search failed: {:#}", e);
            eprintln!("Error processing logs: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
