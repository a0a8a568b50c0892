use super::cases::{negative, performance, regression, security, smoke};
use super::types::{Category, TestCase};

/// Every built-in case, in execution order.
#[must_use]
pub fn all_cases() -> Vec<TestCase> {
    let mut cases = Vec::new();
    cases.extend(smoke::cases());
    cases.extend(regression::cases());
    cases.extend(negative::cases());
    cases.extend(performance::cases());
    cases.extend(security::cases());
    cases
}

/// Keeps the cases in `categories` (all when empty) whose name contains
/// `filter`, if one is given.
#[must_use]
pub fn select_cases(categories: &[Category], filter: Option<&str>) -> Vec<TestCase> {
    all_cases()
        .into_iter()
        .filter(|case| categories.is_empty() || categories.contains(&case.category))
        .filter(|case| filter.is_none_or(|needle| case.name.contains(needle)))
        .collect()
}
