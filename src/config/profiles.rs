use std::time::Duration;

use crate::hn::DEFAULT_BASE_URL;

pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Environment-specific defaults before any file or override is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub base_url: String,
    pub timeout: Duration,
    pub retries: u32,
    pub backoff: Duration,
    pub latency_budget: Duration,
}

const BUILTIN_NAMES: [&str; 3] = ["dev", "staging", "production"];

#[must_use]
pub const fn builtin_profile_names() -> &'static [&'static str] {
    &BUILTIN_NAMES
}

#[must_use]
pub fn builtin_profile(name: &str) -> Option<Profile> {
    let (timeout, retries, backoff, latency_budget) = match name {
        "dev" => (
            Duration::from_secs(10),
            3,
            Duration::from_secs(1),
            Duration::from_secs(3),
        ),
        "staging" => (
            Duration::from_secs(10),
            2,
            Duration::from_secs(1),
            Duration::from_secs(2),
        ),
        "production" => (
            Duration::from_secs(5),
            1,
            Duration::from_millis(500),
            Duration::from_millis(1500),
        ),
        _ => return None,
    };
    Some(Profile {
        name: name.to_owned(),
        base_url: DEFAULT_BASE_URL.to_owned(),
        timeout,
        retries,
        backoff,
        latency_budget,
    })
}
