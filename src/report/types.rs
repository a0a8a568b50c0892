use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ConfigError};
use crate::suite::CaseResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Jsonl,
}

impl ReportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
            ReportFormat::Jsonl => "jsonl",
        };
        f.write_str(name)
    }
}

impl FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "jsonl" | "ndjson" => Ok(ReportFormat::Jsonl),
            _ => Err(AppError::config(ConfigError::InvalidReportFormat {
                value: value.to_owned(),
            })),
        }
    }
}

/// Pass/fail counts over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub environment: String,
    pub base_url: String,
    pub results: Vec<CaseResult>,
}

impl RunReport {
    #[must_use]
    pub fn summary(&self) -> Summary {
        let passed = self.results.iter().filter(|result| result.passed()).count();
        Summary {
            total: self.results.len(),
            passed,
            failed: self.results.len().saturating_sub(passed),
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(CaseResult::passed)
    }
}
