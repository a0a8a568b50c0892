use std::collections::HashSet;

use futures_util::FutureExt;

use crate::error::AppResult;
use crate::hn::StoryList;
use crate::schema::{ShapeKind, check};
use crate::suite::types::{CaseContext, Category, TestCase};
use crate::validate::{ensure, required_fields};

use super::expect_present;

pub(in crate::suite) fn cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "max_item_is_positive",
            category: Category::Smoke,
            run: |ctx| max_item_is_positive(ctx).boxed(),
        },
        TestCase {
            name: "top_stories_are_distinct",
            category: Category::Smoke,
            run: |ctx| top_stories_are_distinct(ctx).boxed(),
        },
        TestCase {
            name: "first_top_story_conforms",
            category: Category::Smoke,
            run: |ctx| first_top_story_conforms(ctx).boxed(),
        },
        TestCase {
            name: "known_user_profile",
            category: Category::Smoke,
            run: |ctx| known_user_profile(ctx).boxed(),
        },
        TestCase {
            name: "updates_are_listed",
            category: Category::Smoke,
            run: |ctx| updates_are_listed(ctx).boxed(),
        },
    ]
}

async fn max_item_is_positive(ctx: CaseContext) -> AppResult<()> {
    let max_id = ctx.client.fetch_max_id().await?;
    ensure(max_id > 0, "maxitem", || {
        format!("Expected a positive max id, got {}", max_id)
    })?;
    Ok(())
}

async fn top_stories_are_distinct(ctx: CaseContext) -> AppResult<()> {
    let ids = ctx.client.fetch_id_list(StoryList::Top, 10).await?;
    ensure(ids.len() == 10, "topstories", || {
        format!("Expected 10 ids, got {}", ids.len())
    })?;
    ensure(ids.iter().all(|id| *id > 0), "topstories", || {
        "Expected every id to be positive".to_owned()
    })?;
    let distinct: HashSet<u64> = ids.iter().copied().collect();
    ensure(distinct.len() == ids.len(), "topstories", || {
        format!("Expected distinct ids, got {:?}", ids)
    })?;
    Ok(())
}

async fn first_top_story_conforms(ctx: CaseContext) -> AppResult<()> {
    let ids = ctx.client.fetch_id_list(StoryList::Top, 1).await?;
    let first = expect_present(ids.first().copied(), "topstories", "a top story")?;
    let id = i64::try_from(first).unwrap_or(i64::MAX);
    let raw = expect_present(
        ctx.client.fetch_item_raw(id).await?,
        "item",
        "the first top story",
    )?;
    required_fields(&raw, &["id", "type", "time"])?;
    check(&raw, ShapeKind::for_item(&raw)).into_result()?;
    Ok(())
}

async fn known_user_profile(ctx: CaseContext) -> AppResult<()> {
    let user = expect_present(ctx.client.fetch_user("pg").await?, "user", "user 'pg'")?;
    ensure(user.id == "pg", "id", || format!("Expected id 'pg', got '{}'", user.id))?;
    ensure(user.karma > 0, "karma", || {
        format!("Expected positive karma, got {}", user.karma)
    })?;
    ensure(user.created > 0, "created", || {
        format!("Expected positive created, got {}", user.created)
    })?;
    let raw = expect_present(ctx.client.fetch_user_raw("pg").await?, "user", "user 'pg'")?;
    check(&raw, ShapeKind::User).into_result()?;
    Ok(())
}

async fn updates_are_listed(ctx: CaseContext) -> AppResult<()> {
    let updates = ctx.client.fetch_updates().await?;
    ensure(!updates.items.is_empty(), "items", || {
        "Expected recently changed items".to_owned()
    })?;
    ensure(!updates.profiles.is_empty(), "profiles", || {
        "Expected recently changed profiles".to_owned()
    })?;
    Ok(())
}
