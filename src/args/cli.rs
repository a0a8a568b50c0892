use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{Overrides, parse_header};
use crate::report::ReportFormat;
use crate::suite::Category;

use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_usize, parse_report_format};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Contract and health checks for the Hacker News API: smoke, regression, negative, performance and security suites with retrying requests and schema validation."
)]
pub struct CliArgs {
    /// Environment profile to run against (dev, staging, production, or one defined in the config file)
    #[arg(long = "env", short = 'e', env = "HNPROBE_ENV")]
    pub environment: Option<String>,

    /// Base URL of the API, overriding the profile
    #[arg(long = "base-url", env = "HNPROBE_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-attempt request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", short = 't', env = "HNPROBE_TIMEOUT", value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Retries after the first attempt
    #[arg(long = "retries", short = 'r', env = "HNPROBE_RETRIES")]
    pub retries: Option<u32>,

    /// Linear backoff step between attempts (supports ms/s/m/h)
    #[arg(long = "backoff", env = "HNPROBE_BACKOFF", value_parser = parse_duration_arg)]
    pub backoff: Option<Duration>,

    /// Latency budget for performance checks (supports ms/s/m/h)
    #[arg(long = "latency-budget", env = "HNPROBE_LATENCY_BUDGET", value_parser = parse_duration_arg)]
    pub latency_budget: Option<Duration>,

    /// Extra request header 'Key: Value' (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Path to config file (TOML or JSON). Defaults to ./hnprobe.toml or ./hnprobe.json if present.
    #[arg(long = "config", short = 'c', env = "HNPROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only run these categories (repeatable or comma-separated)
    #[arg(long = "category", value_enum, value_delimiter = ',')]
    pub categories: Vec<Category>,

    /// Only run cases whose name contains this text
    #[arg(long = "filter", short = 'f')]
    pub filter: Option<String>,

    /// Cases run concurrently
    #[arg(long = "jobs", short = 'j', env = "HNPROBE_JOBS", value_parser = parse_positive_usize)]
    pub jobs: Option<usize>,

    /// Directory the run report is written to
    #[arg(long = "report-dir", env = "HNPROBE_REPORT_DIR")]
    pub report_dir: Option<PathBuf>,

    /// Report format: text, json or jsonl
    #[arg(long = "report-format", env = "HNPROBE_REPORT_FORMAT", value_parser = parse_report_format)]
    pub report_format: Option<ReportFormat>,

    /// Skip writing the report file
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// List the selected cases and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Enable debug logging (set HNPROBE_LOG or RUST_LOG for finer control)
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl CliArgs {
    /// Flags and `HNPROBE_*` variables, as the highest-precedence settings layer.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            environment: self.environment.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            retries: self.retries,
            backoff: self.backoff,
            latency_budget: self.latency_budget,
            headers: self.headers.clone(),
            report_dir: self.report_dir.clone(),
            report_format: self.report_format,
            jobs: self.jobs,
        }
    }
}
