use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::AppResult;
use crate::hn::HnClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Smoke,
    Regression,
    Negative,
    Performance,
    Security,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Smoke,
        Category::Regression,
        Category::Negative,
        Category::Performance,
        Category::Security,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Smoke => "smoke",
            Category::Regression => "regression",
            Category::Negative => "negative",
            Category::Performance => "performance",
            Category::Security => "security",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a case gets to work with: its own client and the shared settings.
#[derive(Debug, Clone)]
pub struct CaseContext {
    pub client: HnClient,
    pub settings: Arc<Settings>,
}

pub type CaseFuture = BoxFuture<'static, AppResult<()>>;

/// A named check. A case passes when its future resolves to `Ok(())`.
#[derive(Clone, Copy)]
pub struct TestCase {
    pub name: &'static str,
    pub category: Category,
    pub run: fn(CaseContext) -> CaseFuture,
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed { message: String },
}

impl Outcome {
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    pub name: String,
    pub category: Category,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub elapsed_ms: u64,
}

impl CaseResult {
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.outcome.is_passed()
    }
}
