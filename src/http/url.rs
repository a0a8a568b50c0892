use reqwest::Url;

/// True when `target` already names an http(s) endpoint.
#[must_use]
pub fn is_absolute_url(target: &str) -> bool {
    Url::parse(target).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Joins `target` onto `base` with exactly one separating slash.
///
/// Absolute targets are returned unchanged.
#[must_use]
pub fn join_url(base: &str, target: &str) -> String {
    if is_absolute_url(target) {
        return target.to_owned();
    }
    let base = base.trim_end_matches('/');
    let path = target.trim_start_matches('/');
    format!("{}/{}", base, path)
}
