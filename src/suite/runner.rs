use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::AppResult;
use crate::hn::HnClient;

use super::types::{CaseContext, CaseResult, Outcome, TestCase};

/// Runs `cases` with at most `settings.jobs` in flight; results keep the input order.
///
/// A failing case is recorded, not returned.
///
/// # Errors
///
/// Returns an error only when a case task panics or is cancelled.
pub async fn run_cases(cases: &[TestCase], settings: Arc<Settings>) -> AppResult<Vec<CaseResult>> {
    let permits = Arc::new(Semaphore::new(settings.jobs.max(1)));
    let mut handles = Vec::with_capacity(cases.len());

    for case in cases.iter().copied() {
        let permits = Arc::clone(&permits);
        let settings = Arc::clone(&settings);
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await;
            run_case(case, settings).await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await?);
    }
    Ok(results)
}

async fn run_case(case: TestCase, settings: Arc<Settings>) -> CaseResult {
    let started = Instant::now();
    let outcome = match HnClient::new(&settings.client_options()) {
        Ok(client) => {
            let context = CaseContext { client, settings };
            match (case.run)(context).await {
                Ok(()) => Outcome::Passed,
                Err(err) => Outcome::Failed {
                    message: err.to_string(),
                },
            }
        }
        Err(err) => Outcome::Failed {
            message: err.to_string(),
        },
    };
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match &outcome {
        Outcome::Passed => info!(
            case = case.name,
            category = %case.category,
            elapsed_ms,
            "PASS"
        ),
        Outcome::Failed { message } => warn!(
            case = case.name,
            category = %case.category,
            elapsed_ms,
            "FAIL: {}",
            message
        ),
    }

    CaseResult {
        name: case.name.to_owned(),
        category: case.category,
        outcome,
        elapsed_ms,
    }
}
