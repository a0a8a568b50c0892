mod api;
mod app;
mod config;
mod decode;
mod http;
mod report;
mod validation;

pub use api::{ApiError, RESOURCE_MISSING_STATUSES, SYNTHETIC_FAILURE_STATUS};
pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use decode::DecodeError;
pub use http::HttpError;
pub use report::ReportError;
pub use validation::{ValidationError, ValidationKind};
