//! Built-in checks against the live service, grouped by category, and the
//! runner that executes them.
mod cases;
mod registry;
mod runner;
mod types;


pub use registry::{all_cases, select_cases};
pub use runner::run_cases;
pub use types::{CaseContext, CaseFuture, CaseResult, Category, Outcome, TestCase};
