//! Retrying HTTP transport and normalized response envelopes.
mod body;
mod client;
mod envelope;
mod request;
mod retry;
mod url;


pub use body::Body;
pub use client::{ApiClient, ClientOptions};
pub use envelope::{Envelope, is_success_status};
pub use request::{HttpMethod, RequestBody, RequestSpec};
pub use retry::{DEFAULT_BACKOFF_UNIT, RetryPolicy, backoff_delay};
pub use url::{is_absolute_url, join_url};
