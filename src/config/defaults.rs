use std::path::PathBuf;

pub const DEFAULT_USER_AGENT: &str = concat!("hnprobe/", env!("CARGO_PKG_VERSION"));

/// Reports land in `~/.hnprobe/reports` unless configured otherwise.
#[must_use]
pub fn default_report_dir() -> PathBuf {
    default_base_dir().join("reports")
}

fn default_base_dir() -> PathBuf {
    if let Some(home) = user_home_dir() {
        return home.join(".hnprobe");
    }

    PathBuf::from(".hnprobe")
}

fn user_home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(value) = std::env::var_os("USERPROFILE") {
            return Some(PathBuf::from(value));
        }
    }

    if let Some(value) = std::env::var_os("HOME") {
        return Some(PathBuf::from(value));
    }

    None
}
