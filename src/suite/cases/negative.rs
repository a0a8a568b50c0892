use futures_util::FutureExt;

use crate::error::{AppError, AppResult};
use crate::http::Envelope;
use crate::suite::types::{CaseContext, Category, TestCase};
use crate::validate::ensure;

const UNKNOWN_USER: &str = "zz_no_such_user_hnprobe";
const FAR_BEYOND_MAX: u64 = 1_000_000_000;

pub(in crate::suite) fn cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "nonpositive_ids_are_absent",
            category: Category::Negative,
            run: |ctx| nonpositive_ids_are_absent(ctx).boxed(),
        },
        TestCase {
            name: "ids_beyond_max_are_absent",
            category: Category::Negative,
            run: |ctx| ids_beyond_max_are_absent(ctx).boxed(),
        },
        TestCase {
            name: "unknown_user_is_absent",
            category: Category::Negative,
            run: |ctx| unknown_user_is_absent(ctx).boxed(),
        },
        TestCase {
            name: "unknown_paths_are_empty",
            category: Category::Negative,
            run: |ctx| unknown_paths_are_empty(ctx).boxed(),
        },
    ]
}

async fn nonpositive_ids_are_absent(ctx: CaseContext) -> AppResult<()> {
    for id in [0, -1] {
        let item = ctx.client.fetch_item(id).await?;
        ensure(item.is_none(), "item", || {
            format!("Expected item {} to be absent, got {:?}", id, item)
        })?;
    }
    Ok(())
}

async fn ids_beyond_max_are_absent(ctx: CaseContext) -> AppResult<()> {
    let max_id = ctx.client.fetch_max_id().await?;
    let beyond = i64::try_from(max_id.saturating_add(FAR_BEYOND_MAX)).unwrap_or(i64::MAX);
    for id in [beyond, i64::MAX] {
        let item = ctx.client.fetch_item(id).await?;
        ensure(item.is_none(), "item", || {
            format!("Expected item {} beyond max {} to be absent", id, max_id)
        })?;
    }
    Ok(())
}

async fn unknown_user_is_absent(ctx: CaseContext) -> AppResult<()> {
    let user = ctx.client.fetch_user(UNKNOWN_USER).await?;
    ensure(user.is_none(), "user", || {
        format!("Expected user '{}' to be absent, got {:?}", UNKNOWN_USER, user)
    })?;
    Ok(())
}

async fn unknown_paths_are_empty(ctx: CaseContext) -> AppResult<()> {
    for target in ["no-such-endpoint.json", "item/not-a-number.json"] {
        let result = ctx.client.api().get(target).await;
        ensure(is_empty_answer(result)?, target, || {
            format!("Expected an empty answer for '{}'", target)
        })?;
    }
    Ok(())
}

/// `null` bodies and resource-missing statuses both count as empty; any other
/// failure is returned.
fn is_empty_answer(result: AppResult<Envelope>) -> AppResult<bool> {
    match result {
        Ok(envelope) => Ok(envelope.body.is_null()),
        Err(AppError::Api(err)) if err.is_resource_missing() => Ok(true),
        Err(err) => Err(err),
    }
}
