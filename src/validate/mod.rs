//! Assertions over decoded JSON payloads.
//!
//! Every function here is pure: it inspects a [`serde_json::Value`] and
//! either returns `Ok(())` or a [`crate::error::ValidationError`] naming the
//! offending field. Fields are addressed with dot-separated paths
//! (`"kids.0"`, `"author.name"`); an empty path addresses the value itself.
mod assertions;
mod path;
mod types;


pub use assertions::{
    ensure, field_type, matches_pattern, non_empty_array, number_in_range, one_of,
    required_fields, status_in,
};
pub use path::{lookup_path, present_path};
pub use types::JsonType;
