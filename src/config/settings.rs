use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError};
use crate::http::{ClientOptions, RetryPolicy};
use crate::report::ReportFormat;

use super::defaults::{DEFAULT_USER_AGENT, default_report_dir};
use super::parse::parse_header;
use super::profiles::{DEFAULT_ENVIRONMENT, Profile, builtin_profile, builtin_profile_names};
use super::types::{ConfigFile, DurationValue, ProfileConfig};

/// Fully resolved run configuration. Built once, then shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: String,
    pub base_url: String,
    pub timeout: Duration,
    pub retries: u32,
    pub backoff: Duration,
    pub latency_budget: Duration,
    pub headers: Vec<(String, String)>,
    pub report_dir: PathBuf,
    pub report_format: ReportFormat,
    pub jobs: usize,
}

/// Values taken from environment variables and CLI flags; highest precedence.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub environment: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub retries: Option<u32>,
    pub backoff: Option<Duration>,
    pub latency_budget: Option<Duration>,
    pub headers: Vec<(String, String)>,
    pub report_dir: Option<PathBuf>,
    pub report_format: Option<ReportFormat>,
    pub jobs: Option<usize>,
}

impl Settings {
    #[must_use]
    pub fn from_profile(profile: Profile) -> Self {
        Self {
            environment: profile.name,
            base_url: profile.base_url,
            timeout: profile.timeout,
            retries: profile.retries,
            backoff: profile.backoff,
            latency_budget: profile.latency_budget,
            headers: Vec::new(),
            report_dir: default_report_dir(),
            report_format: ReportFormat::default(),
            jobs: 1,
        }
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, self.backoff)
    }

    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            retry: self.retry_policy(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            headers: self.headers.clone(),
        }
    }

    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Resolves settings: built-in profile, then config file, then overrides.
///
/// # Errors
///
/// Returns an error when the selected environment is unknown or a configured
/// value is invalid.
pub fn resolve_settings(overrides: Overrides, file: Option<&ConfigFile>) -> AppResult<Settings> {
    let environment = overrides
        .environment
        .clone()
        .or_else(|| file.and_then(|config| config.environment.clone()))
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_owned());

    let file_profile = file
        .and_then(|config| config.profiles.as_ref())
        .and_then(|profiles| profiles.get(&environment));
    let profile = resolve_profile(&environment, file_profile, file)?;
    let mut settings = Settings::from_profile(profile);

    if let Some(config) = file {
        apply_file(&mut settings, config)?;
    }
    apply_overrides(&mut settings, overrides)?;

    debug!(
        "Resolved settings: environment={}, base_url={}, timeout={:?}, retries={}",
        settings.environment, settings.base_url, settings.timeout, settings.retries
    );
    Ok(settings)
}

fn resolve_profile(
    environment: &str,
    file_profile: Option<&ProfileConfig>,
    file: Option<&ConfigFile>,
) -> AppResult<Profile> {
    let builtin = builtin_profile(environment);
    let mut profile = match (builtin, file_profile) {
        (Some(profile), _) => profile,
        (None, Some(_)) => {
            let mut base = builtin_profile(DEFAULT_ENVIRONMENT)
                .ok_or_else(|| unknown_environment(DEFAULT_ENVIRONMENT, file))?;
            environment.clone_into(&mut base.name);
            base
        }
        (None, None) => return Err(AppError::config(unknown_environment(environment, file))),
    };

    if let Some(custom) = file_profile {
        if let Some(base_url) = &custom.base_url {
            base_url.clone_into(&mut profile.base_url);
        }
        if let Some(timeout) = &custom.timeout {
            profile.timeout = to_duration(timeout)?;
        }
        if let Some(retries) = custom.retries {
            profile.retries = retries;
        }
        if let Some(backoff) = &custom.backoff {
            profile.backoff = to_duration(backoff)?;
        }
        if let Some(budget) = &custom.latency_budget {
            profile.latency_budget = to_duration(budget)?;
        }
    }

    Ok(profile)
}

fn unknown_environment(name: &str, file: Option<&ConfigFile>) -> ConfigError {
    let mut known: Vec<String> = builtin_profile_names()
        .iter()
        .map(|name| (*name).to_owned())
        .collect();
    if let Some(profiles) = file.and_then(|config| config.profiles.as_ref()) {
        for name in profiles.keys() {
            if !known.contains(name) {
                known.push(name.clone());
            }
        }
    }
    ConfigError::UnknownEnvironment {
        name: name.to_owned(),
        known: known.join(", "),
    }
}

fn apply_file(settings: &mut Settings, config: &ConfigFile) -> AppResult<()> {
    if let Some(base_url) = &config.base_url {
        base_url.clone_into(&mut settings.base_url);
    }
    if let Some(timeout) = &config.timeout {
        settings.timeout = to_duration(timeout)?;
    }
    if let Some(retries) = config.retries {
        settings.retries = retries;
    }
    if let Some(backoff) = &config.backoff {
        settings.backoff = to_duration(backoff)?;
    }
    if let Some(budget) = &config.latency_budget {
        settings.latency_budget = to_duration(budget)?;
    }
    if let Some(headers) = &config.headers {
        for header in headers {
            settings
                .headers
                .push(parse_header(header).map_err(AppError::config)?);
        }
    }
    if let Some(dir) = &config.report_dir {
        settings.report_dir = PathBuf::from(dir);
    }
    if let Some(format) = config.report_format {
        settings.report_format = format;
    }
    if let Some(jobs) = config.jobs {
        settings.jobs = ensure_positive(jobs, "jobs")?;
    }
    Ok(())
}

fn apply_overrides(settings: &mut Settings, overrides: Overrides) -> AppResult<()> {
    if let Some(base_url) = overrides.base_url {
        settings.base_url = base_url;
    }
    if let Some(timeout) = overrides.timeout {
        settings.timeout = timeout;
    }
    if let Some(retries) = overrides.retries {
        settings.retries = retries;
    }
    if let Some(backoff) = overrides.backoff {
        settings.backoff = backoff;
    }
    if let Some(budget) = overrides.latency_budget {
        settings.latency_budget = budget;
    }
    settings.headers.extend(overrides.headers);
    if let Some(dir) = overrides.report_dir {
        settings.report_dir = dir;
    }
    if let Some(format) = overrides.report_format {
        settings.report_format = format;
    }
    if let Some(jobs) = overrides.jobs {
        settings.jobs = ensure_positive(jobs, "jobs")?;
    }
    Ok(())
}

fn to_duration(value: &DurationValue) -> AppResult<Duration> {
    value.to_duration().map_err(AppError::config)
}

fn ensure_positive(value: usize, field: &'static str) -> AppResult<usize> {
    if value == 0 {
        return Err(AppError::config(ConfigError::FieldMustBePositive { field }));
    }
    Ok(value)
}
