pub(super) mod negative;
pub(super) mod performance;
pub(super) mod regression;
pub(super) mod security;
pub(super) mod smoke;

use crate::error::{AppResult, ValidationError};

/// Unwraps a record the service is expected to have.
fn expect_present<T>(value: Option<T>, field: &str, what: &str) -> AppResult<T> {
    value.ok_or_else(|| {
        ValidationError::expectation(field, format!("Expected {} to exist", what)).into()
    })
}
