use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use super::CliArgs;
use super::parsers::{parse_positive_usize, parse_report_format};
use crate::report::ReportFormat;
use crate::suite::Category;

fn parse(args: &[&str]) -> Result<CliArgs, String> {
    CliArgs::try_parse_from(args).map_err(|err| err.to_string())
}

#[test]
fn defaults_leave_overrides_unset() -> Result<(), String> {
    let args = parse(&["hnprobe"])?;
    if args.no_report || args.list || args.verbose {
        return Err("Unexpected flag defaults".to_owned());
    }
    if !args.categories.is_empty() || args.filter.is_some() {
        return Err("Expected no selection".to_owned());
    }
    let overrides = args.overrides();
    if overrides.timeout.is_some() || overrides.retries.is_some() || overrides.jobs.is_some() {
        return Err(format!("Unexpected overrides {:?}", overrides));
    }
    Ok(())
}

#[test]
fn parses_run_options() -> Result<(), String> {
    let args = parse(&[
        "hnprobe",
        "--env",
        "staging",
        "--timeout",
        "750ms",
        "--retries",
        "0",
        "--backoff",
        "2s",
        "-H",
        "X-Run: nightly",
        "--category",
        "smoke,negative",
        "--category",
        "security",
        "--jobs",
        "4",
        "--report-dir",
        "/tmp/reports",
        "--report-format",
        "jsonl",
        "--filter",
        "user",
    ])?;
    if args.categories != [Category::Smoke, Category::Negative, Category::Security] {
        return Err(format!("Unexpected categories {:?}", args.categories));
    }
    let overrides = args.overrides();
    if overrides.environment.as_deref() != Some("staging") {
        return Err("Unexpected environment".to_owned());
    }
    if overrides.timeout != Some(Duration::from_millis(750))
        || overrides.backoff != Some(Duration::from_secs(2))
    {
        return Err("Unexpected durations".to_owned());
    }
    if overrides.retries != Some(0) || overrides.jobs != Some(4) {
        return Err("Unexpected retry or job counts".to_owned());
    }
    if overrides.headers != vec![("X-Run".to_owned(), "nightly".to_owned())] {
        return Err(format!("Unexpected headers {:?}", overrides.headers));
    }
    if overrides.report_dir != Some(PathBuf::from("/tmp/reports"))
        || overrides.report_format != Some(ReportFormat::Jsonl)
    {
        return Err("Unexpected report options".to_owned());
    }
    Ok(())
}

#[test]
fn rejects_invalid_values() -> Result<(), String> {
    if parse(&["hnprobe", "--timeout", "0s"]).is_ok() {
        return Err("Expected zero timeout to fail".to_owned());
    }
    if parse(&["hnprobe", "--category", "fuzz"]).is_ok() {
        return Err("Expected unknown category to fail".to_owned());
    }
    if parse(&["hnprobe", "-H", "missing-separator"]).is_ok() {
        return Err("Expected invalid header to fail".to_owned());
    }
    if parse(&["hnprobe", "--jobs", "0"]).is_ok() {
        return Err("Expected zero jobs to fail".to_owned());
    }
    Ok(())
}

#[test]
fn value_parsers() -> Result<(), String> {
    if parse_positive_usize(" 3 ").map_err(|err| err.to_string())? != 3 {
        return Err("Unexpected jobs value".to_owned());
    }
    if parse_positive_usize("many").is_ok() {
        return Err("Expected non-numeric jobs to fail".to_owned());
    }
    if parse_report_format("json").map_err(|err| err.to_string())? != ReportFormat::Json {
        return Err("Unexpected report format".to_owned());
    }
    Ok(())
}
