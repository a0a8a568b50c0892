use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// A response body decoded according to its content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    /// Decodes `bytes` as JSON when the content type says so, otherwise as text.
    ///
    /// A JSON content type whose payload does not parse falls back to text so
    /// the raw body still reaches error reports.
    #[must_use]
    pub fn decode(content_type: Option<&str>, bytes: &[u8]) -> Self {
        if content_type.is_some_and(is_json_content_type)
            && let Ok(value) = serde_json::from_slice::<Value>(bytes)
        {
            return Body::Json(value);
        }
        Body::Text(String::from_utf8_lossy(bytes).into_owned())
    }

    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }

    /// True for a JSON `null` payload, the remote's answer for a missing resource.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Body::Json(Value::Null))
    }

    /// Renders the body for logs, cut to at most `max_chars` characters.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let rendered = self.to_string();
        if rendered.chars().count() <= max_chars {
            return rendered;
        }
        let mut cut: String = rendered.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Json(value) => write!(f, "{}", value),
            Body::Text(text) => write!(f, "{}", text),
        }
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("json")
}
