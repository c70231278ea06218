//! Filter Log Events Query Builder
//!
//! Turns [`SearchOptions`] into a resolved [`FilterLogEventsQuery`]. The CLI
//! backend renders it as an argument vector, so log group names and filter
//! patterns are never interpreted by a shell.

#![warn(clippy::all, rust_2018_idioms)]

use crate::app::error::Result;
use crate::app::timestamp::parse_timestamp;

use super::types::SearchOptions;

/// A single `filter-log-events` request with time bounds already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterLogEventsQuery {
    pub log_group_name: String,
    pub filter_pattern: String,
    /// Start time (Unix timestamp in milliseconds)
    pub start_time: Option<i64>,
    /// End time (Unix timestamp in milliseconds)
    pub end_time: Option<i64>,
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl FilterLogEventsQuery {
    /// Arguments following the `aws` program name
    pub fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "logs".to_string(),
            "filter-log-events".to_string(),
            "--log-group-name".to_string(),
            self.log_group_name.clone(),
            "--filter-pattern".to_string(),
            self.filter_pattern.clone(),
        ];

        if let Some(start_time) = self.start_time {
            args.push("--start-time".to_string());
            args.push(start_time.to_string());
        }

        if let Some(end_time) = self.end_time {
            args.push("--end-time".to_string());
            args.push(end_time.to_string());
        }

        if let Some(profile) = &self.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }

        if let Some(region) = &self.region {
            args.push("--region".to_string());
            args.push(region.clone());
        }

        // A user-level `output = table` in ~/.aws/config would break parsing
        args.push("--output".to_string());
        args.push("json".to_string());

        args
    }

    /// Human readable command line, for logs and error messages only
    pub fn display_command(&self, program: &str) -> String {
        let mut rendered = vec![program.to_string()];
        rendered.extend(self.to_cli_args().iter().map(|arg| quote_for_display(arg)));
        rendered.join(" ")
    }
}

fn quote_for_display(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@,+".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Query for the initial, user-supplied search pattern
pub fn build_search_query(options: &SearchOptions) -> Result<FilterLogEventsQuery> {
    build_query(options, options.search_pattern.clone())
}

/// Query for every log line of one Lambda invocation
pub fn build_request_query(request_id: &str, options: &SearchOptions) -> Result<FilterLogEventsQuery> {
    build_query(options, format!("RequestId: {}", request_id))
}

fn build_query(options: &SearchOptions, filter_pattern: String) -> Result<FilterLogEventsQuery> {
    let start_time = options.from.as_deref().map(parse_timestamp).transpose()?;
    let end_time = options.to.as_deref().map(parse_timestamp).transpose()?;

    Ok(FilterLogEventsQuery {
        log_group_name: options.log_group.clone(),
        filter_pattern,
        start_time,
        end_time,
        profile: options.profile.clone(),
        region: options.region.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::error::LogSearchError;
    use pretty_assertions::assert_eq;

    fn base_options() -> SearchOptions {
        SearchOptions::new("/aws/lambda/orders", "ERROR", "./out")
    }

    #[test]
    fn test_minimal_query_args() {
        let query = build_search_query(&base_options()).unwrap();

        assert_eq!(
            query.to_cli_args(),
            vec![
                "logs",
                "filter-log-events",
                "--log-group-name",
                "/aws/lambda/orders",
                "--filter-pattern",
                "ERROR",
                "--output",
                "json",
            ]
        );
    }

    #[test]
    fn test_optional_flags_in_order() {
        let options = base_options()
            .with_from("1000")
            .with_to("1970-01-01T00:00:02Z")
            .with_profile("prod")
            .with_region("us-east-1");

        let query = build_search_query(&options).unwrap();
        assert_eq!(query.start_time, Some(1000));
        assert_eq!(query.end_time, Some(2000));

        assert_eq!(
            query.to_cli_args()[6..].to_vec(),
            vec![
                "--start-time",
                "1000",
                "--end-time",
                "2000",
                "--profile",
                "prod",
                "--region",
                "us-east-1",
                "--output",
                "json",
            ]
        );
    }

    #[test]
    fn test_request_query_reuses_options() {
        let options = base_options().with_from("5").with_region("eu-west-1");
        let query =
            build_request_query("11111111-1111-1111-1111-111111111111", &options).unwrap();

        assert_eq!(
            query.filter_pattern,
            "RequestId: 11111111-1111-1111-1111-111111111111"
        );
        assert_eq!(query.log_group_name, "/aws/lambda/orders");
        assert_eq!(query.start_time, Some(5));
        assert_eq!(query.region.as_deref(), Some("eu-west-1"));
        assert!(query.profile.is_none());
    }

    #[test]
    fn test_shell_metacharacters_stay_single_arguments() {
        let options = SearchOptions::new("grp\"; rm -rf ~", "\"ERROR\" $(whoami)", "./out");
        let args = build_search_query(&options).unwrap().to_cli_args();

        assert_eq!(args[3], "grp\"; rm -rf ~");
        assert_eq!(args[5], "\"ERROR\" $(whoami)");
    }

    #[test]
    fn test_invalid_bound_fails() {
        let options = base_options().with_to("not a date");
        let err = build_search_query(&options).unwrap_err();
        assert!(matches!(err, LogSearchError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_display_command_quotes() {
        let options = SearchOptions::new("/aws/lambda/orders", "RequestId: it's", "./out");
        let query = build_search_query(&options).unwrap();

        assert_eq!(
            query.display_command("aws"),
            "aws logs filter-log-events --log-group-name /aws/lambda/orders \
             --filter-pattern 'RequestId: it'\\''s' --output json"
        );
    }
}
