use thiserror::Error;

use crate::http::Body;

/// Status reported for failures that never produced an HTTP response.
pub const SYNTHETIC_FAILURE_STATUS: u16 = 500;

/// Statuses treated as "the resource does not exist" by the domain client.
pub const RESOURCE_MISSING_STATUSES: [u16; 3] = [400, 404, 410];

/// A request that still failed after its retry budget was spent.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{method} {url} returned {status} {status_text} after {attempts} attempt(s)")]
    Status {
        method: String,
        url: String,
        status: u16,
        status_text: String,
        body: Body,
        attempts: u32,
    },
    #[error("{method} {url} failed after {attempts} attempt(s): {message}")]
    Transport {
        method: String,
        url: String,
        message: String,
        timed_out: bool,
        attempts: u32,
    },
}

impl ApiError {
    /// Last observed status, or the synthetic 500 for transport failures.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            ApiError::Status { status, .. } => *status,
            ApiError::Transport { .. } => SYNTHETIC_FAILURE_STATUS,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            ApiError::Status { url, .. } | ApiError::Transport { url, .. } => url,
        }
    }

    /// Decoded response body. Transport failures carry the failure message as text.
    #[must_use]
    pub fn body(&self) -> Body {
        match self {
            ApiError::Status { body, .. } => body.clone(),
            ApiError::Transport { message, .. } => Body::Text(message.clone()),
        }
    }

    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            ApiError::Status { attempts, .. } | ApiError::Transport { attempts, .. } => *attempts,
        }
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        match self {
            ApiError::Status { .. } => false,
            ApiError::Transport { timed_out, .. } => *timed_out,
        }
    }

    /// True when the remote answered with a resource-missing status.
    #[must_use]
    pub fn is_resource_missing(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => RESOURCE_MISSING_STATUSES.contains(status),
            ApiError::Transport { .. } => false,
        }
    }
}
