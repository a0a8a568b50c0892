//! Run configuration: built-in profiles, config files and environment overrides.
mod defaults;
mod loader;
mod parse;
mod profiles;
mod settings;
pub mod types;


pub use defaults::{DEFAULT_USER_AGENT, default_report_dir};
pub use loader::{load_config, load_config_file};
pub use parse::{parse_bool, parse_duration_value, parse_header};
pub use profiles::{DEFAULT_ENVIRONMENT, Profile, builtin_profile, builtin_profile_names};
pub use settings::{Overrides, Settings, resolve_settings};
