//! Command line surface.

#![warn(clippy::all, rust_2018_idioms)]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::data_plane::cloudwatch_logs::{
    AwsCliInvoker, CloudWatchLogsClient, LogSearchBackend, SearchOptions, DEFAULT_AWS_CLI,
};
use super::settings::{Backend, Settings};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_BRANCH"),
    "@",
    env!("GIT_COMMIT"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "aws-log-processor")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "CLI tool to search and download AWS CloudWatch logs for Lambda functions")]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search CloudWatch logs for a pattern and download matching Lambda execution logs
    Search(SearchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// CloudWatch log group name
    #[arg(short = 'g', long, value_name = "NAME")]
    pub log_group: String,

    /// Pattern to search for in logs
    #[arg(short, long, value_name = "PATTERN")]
    pub search_pattern: String,

    /// Directory to save log files
    #[arg(short, long, value_name = "DIRECTORY")]
    pub destination: PathBuf,

    /// Start time for the search (ISO format or Unix timestamp in milliseconds)
    #[arg(short, long, value_name = "TIMESTAMP")]
    pub from: Option<String>,

    /// End time for the search (ISO format or Unix timestamp in milliseconds)
    #[arg(short, long, value_name = "TIMESTAMP")]
    pub to: Option<String>,

    /// AWS profile to use
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// AWS region
    #[arg(short, long, value_name = "REGION")]
    pub region: Option<String>,

    /// How queries are executed
    #[arg(long, value_name = "cli|sdk")]
    pub backend: Option<Backend>,

    /// AWS CLI executable used by the cli backend
    #[arg(long, value_name = "PATH")]
    pub aws_cli: Option<PathBuf>,
}

/// Search arguments merged with settings file defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSearch {
    pub options: SearchOptions,
    pub backend: Backend,
    pub aws_cli: PathBuf,
}

impl SearchArgs {
    /// Fill unset flags from `settings`; flags given on the command line win
    pub fn resolve(self, settings: &Settings) -> ResolvedSearch {
        let mut options = SearchOptions::new(self.log_group, self.search_pattern, self.destination);
        options.from = self.from;
        options.to = self.to;
        options.profile = self.profile.or_else(|| settings.profile.clone());
        options.region = self.region.or_else(|| settings.region.clone());

        ResolvedSearch {
            options,
            backend: self.backend.or(settings.backend).unwrap_or_default(),
            aws_cli: self
                .aws_cli
                .or_else(|| settings.aws_cli.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_AWS_CLI)),
        }
    }
}

impl ResolvedSearch {
    pub async fn build_backend(&self) -> Box<dyn LogSearchBackend> {
        match self.backend {
            Backend::Cli => Box::new(AwsCliInvoker::with_program(&self.aws_cli)),
            Backend::Sdk => Box::new(
                CloudWatchLogsClient::from_profile(
                    self.options.profile.as_deref(),
                    self.options.region.as_deref(),
                )
                .await,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> SearchArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Search(args) => args,
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&[
            "aws-log-processor",
            "search",
            "-g",
            "/aws/lambda/orders",
            "-s",
            "ERROR",
            "-d",
            "./out",
            "-f",
            "1000",
            "-t",
            "2024-01-15T00:00:00Z",
            "-p",
            "prod",
            "-r",
            "us-east-1",
        ]);

        assert_eq!(args.log_group, "/aws/lambda/orders");
        assert_eq!(args.search_pattern, "ERROR");
        assert_eq!(args.destination, PathBuf::from("./out"));
        assert_eq!(args.from.as_deref(), Some("1000"));
        assert_eq!(args.to.as_deref(), Some("2024-01-15T00:00:00Z"));
        assert_eq!(args.profile.as_deref(), Some("prod"));
        assert_eq!(args.region.as_deref(), Some("us-east-1"));
        assert!(args.backend.is_none());
    }

    #[test]
    fn test_required_options() {
        let result = Cli::try_parse_from(["aws-log-processor", "search", "-g", "grp", "-s", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_settings() {
        let args = parse(&[
            "aws-log-processor",
            "search",
            "--log-group",
            "grp",
            "--search-pattern",
            "x",
            "--destination",
            "out",
            "--region",
            "us-west-2",
            "--backend",
            "sdk",
        ]);
        let settings = Settings {
            profile: Some("from-file".to_string()),
            region: Some("eu-west-1".to_string()),
            backend: Some(Backend::Cli),
            aws_cli: Some(PathBuf::from("/opt/aws")),
        };

        let resolved = args.resolve(&settings);
        assert_eq!(resolved.options.profile.as_deref(), Some("from-file"));
        assert_eq!(resolved.options.region.as_deref(), Some("us-west-2"));
        assert_eq!(resolved.backend, Backend::Sdk);
        assert_eq!(resolved.aws_cli, PathBuf::from("/opt/aws"));
    }

    #[test]
    fn test_defaults_without_settings() {
        let args = parse(&["aws-log-processor", "search", "-g", "g", "-s", "p", "-d", "d"]);
        let resolved = args.resolve(&Settings::default());

        assert_eq!(resolved.backend, Backend::Cli);
        assert_eq!(resolved.aws_cli, PathBuf::from("aws"));
        assert!(resolved.options.profile.is_none());
        assert!(resolved.options.region.is_none());
    }
}
