use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use super::Body;

/// The normalized result of one HTTP attempt.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub url: String,
    pub status: u16,
    pub status_text: String,
    /// Header names are lowercase.
    pub headers: BTreeMap<String, String>,
    pub body: Body,
    pub ok: bool,
    pub elapsed: Duration,
    /// Attempts spent on the request that produced this envelope, starting at 1.
    pub attempts: u32,
}

impl Envelope {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    #[must_use]
    pub const fn json(&self) -> Option<&Value> {
        self.body.as_json()
    }
}

#[must_use]
pub const fn is_success_status(status: u16) -> bool {
    status >= 200 && status <= 299
}
