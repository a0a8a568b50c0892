use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::report::ReportFormat;

/// Contents of `hnprobe.toml` / `hnprobe.json`.
///
/// Top-level keys override the selected profile; `[profiles.<name>]` tables
/// override or add profiles.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "env")]
    pub environment: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<DurationValue>,
    pub retries: Option<u32>,
    pub backoff: Option<DurationValue>,
    pub latency_budget: Option<DurationValue>,
    pub headers: Option<Vec<String>>,
    pub report_dir: Option<String>,
    pub report_format: Option<ReportFormat>,
    pub jobs: Option<usize>,
    pub profiles: Option<BTreeMap<String, ProfileConfig>>,
}

/// One `[profiles.<name>]` table; unset keys inherit the built-in profile of
/// the same name, or `dev` for new names.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub base_url: Option<String>,
    pub timeout: Option<DurationValue>,
    pub retries: Option<u32>,
    pub backoff: Option<DurationValue>,
    pub latency_budget: Option<DurationValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ConfigError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ConfigError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }
}
