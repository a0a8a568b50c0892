use futures_util::FutureExt;

use crate::error::AppResult;
use crate::hn::{ItemType, StoryList};
use crate::schema::{ShapeKind, check, check_item};
use crate::suite::types::{CaseContext, Category, TestCase};
use crate::validate::{
    ensure, lookup_path, matches_pattern, non_empty_array, number_in_range, one_of,
};

use super::expect_present;

/// A long-settled story with a populated comment tree.
const SETTLED_STORY_ID: i64 = 8863;
const FIRST_ITEM_TIME: i64 = 1_160_418_111;
const FIRST_ITEM_TIME_SECS: f64 = 1_160_418_111.0;
const ITEM_TYPES: [&str; 5] = ["story", "comment", "job", "poll", "pollopt"];

pub(in crate::suite) fn cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "first_item_is_stable",
            category: Category::Regression,
            run: |ctx| first_item_is_stable(ctx).boxed(),
        },
        TestCase {
            name: "item_fetch_is_idempotent",
            category: Category::Regression,
            run: |ctx| item_fetch_is_idempotent(ctx).boxed(),
        },
        TestCase {
            name: "story_lists_honor_limit",
            category: Category::Regression,
            run: |ctx| story_lists_honor_limit(ctx).boxed(),
        },
        TestCase {
            name: "comment_points_to_parent",
            category: Category::Regression,
            run: |ctx| comment_points_to_parent(ctx).boxed(),
        },
        TestCase {
            name: "settled_story_fields",
            category: Category::Regression,
            run: |ctx| settled_story_fields(ctx).boxed(),
        },
    ]
}

async fn first_item_is_stable(ctx: CaseContext) -> AppResult<()> {
    let item = expect_present(ctx.client.fetch_item(1).await?, "item", "item 1")?;
    ensure(item.id == 1, "id", || format!("Expected id 1, got {}", item.id))?;
    ensure(item.by.as_deref() == Some("pg"), "by", || {
        format!("Expected author 'pg', got {:?}", item.by)
    })?;
    ensure(item.time == Some(FIRST_ITEM_TIME), "time", || {
        format!("Expected time {}, got {:?}", FIRST_ITEM_TIME, item.time)
    })?;
    ensure(item.title.as_deref() == Some("Y Combinator"), "title", || {
        format!("Expected title 'Y Combinator', got {:?}", item.title)
    })?;
    ensure(item.item_type == Some(ItemType::Story), "type", || {
        format!("Expected a story, got {:?}", item.item_type)
    })?;
    Ok(())
}

async fn item_fetch_is_idempotent(ctx: CaseContext) -> AppResult<()> {
    let first = expect_present(
        ctx.client.fetch_item(SETTLED_STORY_ID).await?,
        "item",
        "the settled story",
    )?;
    let second = expect_present(
        ctx.client.fetch_item(SETTLED_STORY_ID).await?,
        "item",
        "the settled story",
    )?;
    ensure(
        first.without_volatile() == second.without_volatile(),
        "item",
        || format!("Item {} changed between fetches", SETTLED_STORY_ID),
    )?;
    Ok(())
}

async fn story_lists_honor_limit(ctx: CaseContext) -> AppResult<()> {
    for list in StoryList::ALL {
        let empty = ctx.client.fetch_id_list(list, 0).await?;
        ensure(empty.is_empty(), list.as_str(), || {
            format!("Expected no ids for limit 0, got {}", empty.len())
        })?;

        let full = ctx.client.fetch_id_list(list, usize::MAX).await?;
        let limited = ctx.client.fetch_id_list(list, 5).await?;
        let expected = full.len().min(5);
        ensure(limited.len() == expected, list.as_str(), || {
            format!("Expected {} ids, got {}", expected, limited.len())
        })?;
        // Lists are re-ranked continuously; only the lengths are stable.
        ensure(limited.len() <= full.len(), list.as_str(), || {
            "Limited list is longer than the full list".to_owned()
        })?;
    }
    Ok(())
}

async fn comment_points_to_parent(ctx: CaseContext) -> AppResult<()> {
    let story = expect_present(
        ctx.client.fetch_item_raw(SETTLED_STORY_ID).await?,
        "item",
        "the settled story",
    )?;
    non_empty_array(&story, "kids")?;
    let kid = expect_present(
        lookup_path(&story, "kids.0").and_then(serde_json::Value::as_i64),
        "kids.0",
        "a first comment id",
    )?;

    let comment = expect_present(ctx.client.fetch_item(kid).await?, "item", "the first comment")?;
    ensure(comment.item_type == Some(ItemType::Comment), "type", || {
        format!("Expected a comment, got {:?}", comment.item_type)
    })?;
    let parent = i64::try_from(comment.parent.unwrap_or_default()).unwrap_or(-1);
    ensure(parent == SETTLED_STORY_ID, "parent", || {
        format!("Expected parent {}, got {:?}", SETTLED_STORY_ID, comment.parent)
    })?;

    let raw = expect_present(ctx.client.fetch_item_raw(kid).await?, "item", "the first comment")?;
    check(&raw, ShapeKind::Comment).into_result()?;
    Ok(())
}

async fn settled_story_fields(ctx: CaseContext) -> AppResult<()> {
    let story = expect_present(
        ctx.client.fetch_item_raw(SETTLED_STORY_ID).await?,
        "item",
        "the settled story",
    )?;
    one_of(&story, "type", &ITEM_TYPES)?;
    matches_pattern(&story, "url", r"^https?://")?;
    matches_pattern(&story, "by", r"^[A-Za-z0-9_-]+$")?;
    number_in_range(&story, "time", FIRST_ITEM_TIME_SECS, f64::MAX)?;
    number_in_range(&story, "score", 0.0, f64::MAX)?;
    check_item(&story).into_result()?;
    Ok(())
}
