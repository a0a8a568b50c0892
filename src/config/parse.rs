use std::time::Duration;

use crate::error::ConfigError;

/// Parses `"<n>[ms|s|m|h]"`; a bare number means seconds.
///
/// # Errors
///
/// Returns an error for empty input, unknown units, overflow, or zero.
pub fn parse_duration_value(value: &str) -> Result<Duration, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::DurationEmpty);
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(ConfigError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ConfigError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ConfigError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or(ConfigError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ConfigError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.as_millis() == 0 {
        return Err(ConfigError::DurationZero);
    }

    Ok(duration)
}

/// Splits a `"Key: Value"` header.
///
/// # Errors
///
/// Returns an error when there is no `:` separator.
pub fn parse_header(s: &str) -> Result<(String, String), ConfigError> {
    match s.split_once(':') {
        Some((key, value)) => Ok((key.trim().to_owned(), value.trim().to_owned())),
        None => Err(ConfigError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

/// # Errors
///
/// Returns an error for anything but true/false, yes/no, on/off, or 1/0.
pub fn parse_bool(s: &str) -> Result<bool, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBoolean {
            value: s.to_owned(),
        }),
    }
}
