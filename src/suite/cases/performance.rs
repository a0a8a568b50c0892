use std::time::Duration;

use futures_util::FutureExt;
use tokio::time::Instant;

use crate::error::AppResult;
use crate::hn::StoryList;
use crate::suite::types::{CaseContext, Category, TestCase};
use crate::validate::ensure;

const FAN_OUT: usize = 10;

pub(in crate::suite) fn cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "max_item_within_budget",
            category: Category::Performance,
            run: |ctx| max_item_within_budget(ctx).boxed(),
        },
        TestCase {
            name: "story_list_within_budget",
            category: Category::Performance,
            run: |ctx| story_list_within_budget(ctx).boxed(),
        },
        TestCase {
            name: "concurrent_items_within_budget",
            category: Category::Performance,
            run: |ctx| concurrent_items_within_budget(ctx).boxed(),
        },
    ]
}

async fn max_item_within_budget(ctx: CaseContext) -> AppResult<()> {
    let envelope = ctx.client.api().get("maxitem.json").await?;
    within_budget("maxitem", envelope.elapsed, ctx.settings.latency_budget)
}

async fn story_list_within_budget(ctx: CaseContext) -> AppResult<()> {
    let envelope = ctx.client.api().get(&StoryList::Top.endpoint()).await?;
    within_budget("topstories", envelope.elapsed, ctx.settings.latency_budget)
}

/// The concurrent batch gets twice the single-request budget.
async fn concurrent_items_within_budget(ctx: CaseContext) -> AppResult<()> {
    let ids: Vec<i64> = ctx
        .client
        .fetch_id_list(StoryList::Top, FAN_OUT)
        .await?
        .into_iter()
        .filter_map(|id| i64::try_from(id).ok())
        .collect();
    let started = Instant::now();
    let items = ctx.client.fetch_items(&ids).await?;
    let elapsed = started.elapsed();

    ensure(items.len() == ids.len(), "items", || {
        format!("Expected {} results, got {}", ids.len(), items.len())
    })?;
    for (id, item) in ids.iter().zip(&items) {
        if let Some(item) = item {
            let fetched = i64::try_from(item.id).unwrap_or(-1);
            ensure(fetched == *id, "id", || {
                format!("Result for {} carries id {}", id, item.id)
            })?;
        }
    }
    within_budget("items", elapsed, ctx.settings.latency_budget.saturating_mul(2))
}

fn within_budget(field: &str, elapsed: Duration, budget: Duration) -> AppResult<()> {
    ensure(elapsed <= budget, field, || {
        format!(
            "Took {} ms, budget is {} ms",
            elapsed.as_millis(),
            budget.as_millis()
        )
    })?;
    Ok(())
}
