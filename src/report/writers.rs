use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{AppError, AppResult, ReportError};
use crate::suite::Outcome;

use super::format::{format_ms, write_line};
use super::types::{ReportFormat, RunReport};

const REPORT_STEM: &str = "hnprobe-report";

/// `<dir>/hnprobe-report.<ext>`.
#[must_use]
pub fn report_path(dir: &Path, format: ReportFormat) -> PathBuf {
    dir.join(format!("{}.{}", REPORT_STEM, format.extension()))
}

/// Renders `report` in `format`.
///
/// # Errors
///
/// Returns an error if the report fails to serialize.
pub fn render_report(report: &RunReport, format: ReportFormat) -> AppResult<String> {
    match format {
        ReportFormat::Text => render_text(report),
        ReportFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|err| AppError::report(ReportError::Serialize { source: err })),
        ReportFormat::Jsonl => render_jsonl(report),
    }
}

/// Writes the rendered report into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub async fn write_report(report: &RunReport, dir: &Path, format: ReportFormat) -> AppResult<PathBuf> {
    let output = render_report(report, format)?;
    tokio::fs::create_dir_all(dir).await.map_err(|err| {
        AppError::report(ReportError::CreateDir {
            path: dir.to_path_buf(),
            source: err,
        })
    })?;
    let path = report_path(dir, format);
    tokio::fs::write(&path, output).await.map_err(|err| {
        AppError::report(ReportError::Write {
            path: path.clone(),
            source: err,
        })
    })?;
    info!("Report written to {}", path.display());
    Ok(path)
}

fn render_text(report: &RunReport) -> AppResult<String> {
    let mut output = String::new();
    write_line(
        &mut output,
        &format!(
            "hnprobe run {} against {} ({})",
            report.started_at.to_rfc3339(),
            report.base_url,
            report.environment
        ),
    )?;
    for result in &report.results {
        let line = match &result.outcome {
            Outcome::Passed => format!(
                "PASS [{}] {} ({}s)",
                result.category,
                result.name,
                format_ms(result.elapsed_ms)
            ),
            Outcome::Failed { message } => format!(
                "FAIL [{}] {} ({}s): {}",
                result.category,
                result.name,
                format_ms(result.elapsed_ms),
                message
            ),
        };
        write_line(&mut output, &line)?;
    }
    let summary = report.summary();
    write_line(
        &mut output,
        &format!(
            "{} passed, {} failed, {} total",
            summary.passed, summary.failed, summary.total
        ),
    )?;
    Ok(output)
}

/// One header record, then one record per case.
fn render_jsonl(report: &RunReport) -> AppResult<String> {
    let mut output = String::new();
    let header = serde_json::json!({
        "started_at": report.started_at,
        "environment": report.environment,
        "base_url": report.base_url,
        "summary": report.summary(),
    });
    write_line(&mut output, &header.to_string())?;
    for result in &report.results {
        let line = serde_json::to_string(result)
            .map_err(|err| AppError::report(ReportError::Serialize { source: err }))?;
        write_line(&mut output, &line)?;
    }
    Ok(output)
}
