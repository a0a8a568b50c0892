//! Run reports rendered as text, JSON or JSONL.
mod format;
mod types;
mod writers;

#[cfg(test)]
mod tests;

pub use types::{ReportFormat, RunReport, Summary};
pub use writers::{render_report, report_path, write_report};
