use std::str::FromStr;
use std::time::Duration;

use crate::config::{parse_bool, parse_duration_value};
use crate::error::{AppResult, ConfigError};
use crate::report::ReportFormat;

pub(super) fn parse_duration_arg(s: &str) -> Result<Duration, ConfigError> {
    parse_duration_value(s)
}

pub(super) fn parse_bool_env(s: &str) -> Result<bool, ConfigError> {
    parse_bool(s)
}

pub(super) fn parse_report_format(s: &str) -> AppResult<ReportFormat> {
    ReportFormat::from_str(s)
}

pub(super) fn parse_positive_usize(s: &str) -> Result<usize, ConfigError> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|err: std::num::ParseIntError| ConfigError::InvalidEnvValue {
            var: "jobs",
            value: s.to_owned(),
            reason: err.to_string(),
        })?;
    if value == 0 {
        return Err(ConfigError::FieldMustBePositive { field: "jobs" });
    }
    Ok(value)
}
