use thiserror::Error;

use super::{ApiError, ConfigError, DecodeError, HttpError, ReportError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn api<E>(error: E) -> Self
    where
        E: Into<ApiError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn decode<E>(error: E) -> Self
    where
        E: Into<DecodeError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn report<E>(error: E) -> Self
    where
        E: Into<ReportError>,
    {
        error.into().into()
    }

    /// Returns the transport error when this error came from an exhausted request.
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            AppError::Api(err) => Some(err),
            AppError::Io { .. }
            | AppError::Clap { .. }
            | AppError::Join { .. }
            | AppError::Http(_)
            | AppError::Validation(_)
            | AppError::Decode(_)
            | AppError::Config(_)
            | AppError::Report(_) => None,
        }
    }

    /// Returns the validation failure, if this error is one.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AppError::Validation(err) => Some(err),
            AppError::Io { .. }
            | AppError::Clap { .. }
            | AppError::Join { .. }
            | AppError::Api(_)
            | AppError::Http(_)
            | AppError::Decode(_)
            | AppError::Config(_)
            | AppError::Report(_) => None,
        }
    }
}
