use std::fmt::Write as _;

use crate::error::{AppError, AppResult, ReportError};

pub(super) fn write_line(output: &mut String, line: &str) -> AppResult<()> {
    writeln!(output, "{}", line)
        .map_err(|err| AppError::report(ReportError::WriteLine { source: err }))
}

/// Milliseconds as seconds with two decimals, e.g. `1234` → `1.23`.
pub(super) fn format_ms(value: u64) -> String {
    format!("{}.{:02}", value / 1000, (value % 1000) / 10)
}
