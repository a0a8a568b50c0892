use std::str::FromStr;

use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use super::{ReportFormat, RunReport, render_report, report_path, write_report};
use crate::suite::{CaseResult, Category, Outcome};

fn sample_report() -> Result<RunReport, String> {
    let started_at = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .ok_or("invalid timestamp")?;
    Ok(RunReport {
        started_at,
        environment: "dev".to_owned(),
        base_url: "https://hacker-news.firebaseio.com/v0".to_owned(),
        results: vec![
            CaseResult {
                name: "max_item_is_positive".to_owned(),
                category: Category::Smoke,
                outcome: Outcome::Passed,
                elapsed_ms: 1234,
            },
            CaseResult {
                name: "unknown_user_is_absent".to_owned(),
                category: Category::Negative,
                outcome: Outcome::Failed {
                    message: "Expected user to be absent".to_owned(),
                },
                elapsed_ms: 40,
            },
        ],
    })
}

#[test]
fn summary_counts_outcomes() -> Result<(), String> {
    let report = sample_report()?;
    let summary = report.summary();
    if summary.total != 2 || summary.passed != 1 || summary.failed != 1 {
        return Err(format!("Unexpected summary {:?}", summary));
    }
    if report.all_passed() {
        return Err("Report with a failure should not pass".to_owned());
    }
    Ok(())
}

#[test]
fn text_report_lists_each_case() -> Result<(), String> {
    let output = render_report(&sample_report()?, ReportFormat::Text).map_err(|err| err.to_string())?;
    if !output.contains("PASS [smoke] max_item_is_positive (1.23s)") {
        return Err(format!("Missing pass line:\n{}", output));
    }
    if !output.contains("FAIL [negative] unknown_user_is_absent (0.04s): Expected user to be absent")
    {
        return Err(format!("Missing fail line:\n{}", output));
    }
    if !output.contains("1 passed, 1 failed, 2 total") {
        return Err(format!("Missing summary:\n{}", output));
    }
    Ok(())
}

#[test]
fn jsonl_report_has_header_and_one_line_per_case() -> Result<(), String> {
    let output =
        render_report(&sample_report()?, ReportFormat::Jsonl).map_err(|err| err.to_string())?;
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()
        .map_err(|err| err.to_string())?;
    if lines.len() != 3 {
        return Err(format!("Expected 3 lines, got {}", lines.len()));
    }
    let header = lines.first().ok_or("missing header")?;
    if header.get("environment").and_then(serde_json::Value::as_str) != Some("dev") {
        return Err(format!("Unexpected header {}", header));
    }
    let failed = lines.get(2).ok_or("missing case line")?;
    if failed.get("status").and_then(serde_json::Value::as_str) != Some("failed") {
        return Err(format!("Unexpected case line {}", failed));
    }
    Ok(())
}

#[test]
fn report_format_parses_aliases() -> Result<(), String> {
    let cases = [
        ("text", ReportFormat::Text),
        ("JSON", ReportFormat::Json),
        ("ndjson", ReportFormat::Jsonl),
    ];
    for (input, expected) in cases {
        let parsed = ReportFormat::from_str(input).map_err(|err| err.to_string())?;
        if parsed != expected {
            return Err(format!("{} parsed as {}", input, parsed));
        }
    }
    if ReportFormat::from_str("xml").is_ok() {
        return Err("Expected xml to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn write_report_creates_directory() -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(async {
        let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        let target = dir.path().join("nested").join("reports");
        let report = sample_report()?;
        let path = write_report(&report, &target, ReportFormat::Json)
            .await
            .map_err(|err| err.to_string())?;
        if path != report_path(&target, ReportFormat::Json) {
            return Err(format!("Unexpected path {}", path.display()));
        }
        let content = std::fs::read_to_string(&path).map_err(|err| err.to_string())?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|err| err.to_string())?;
        let results = value
            .get("results")
            .and_then(serde_json::Value::as_array)
            .ok_or("missing results")?;
        if results.len() != 2 {
            return Err(format!("Unexpected results {}", value));
        }
        Ok(())
    })
}
