use futures_util::{FutureExt, future};
use serde_json::json;

use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{HttpMethod, RequestSpec};
use crate::suite::types::{CaseContext, Category, TestCase};
use crate::validate::{ensure, status_in};

/// Targets that try to smuggle queries, traversal or markup through the id.
const HOSTILE_ITEM_TARGETS: [&str; 3] = [
    "item/1%27%20OR%201=1.json",
    "item/..%2F..%2Fetc%2Fpasswd.json",
    "item/%3Cscript%3Ealert(1)%3C%2Fscript%3E.json",
];
const HOSTILE_USER: &str = "<script>alert(1)</script>";

pub(in crate::suite) fn cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "base_url_uses_https",
            category: Category::Security,
            run: |ctx| future::ready(base_url_uses_https(&ctx)).boxed(),
        },
        TestCase {
            name: "responses_are_json",
            category: Category::Security,
            run: |ctx| responses_are_json(ctx).boxed(),
        },
        TestCase {
            name: "writes_are_rejected",
            category: Category::Security,
            run: |ctx| writes_are_rejected(ctx).boxed(),
        },
        TestCase {
            name: "hostile_ids_are_not_server_errors",
            category: Category::Security,
            run: |ctx| hostile_ids_are_not_server_errors(ctx).boxed(),
        },
    ]
}

fn base_url_uses_https(ctx: &CaseContext) -> AppResult<()> {
    let url = ctx.client.api().resolve_url("maxitem.json")?;
    ensure(url.scheme() == "https", "base_url", || {
        format!("Expected an https base URL, got {}", ctx.settings.base_url)
    })?;
    Ok(())
}

async fn responses_are_json(ctx: CaseContext) -> AppResult<()> {
    let envelope = ctx.client.api().get("item/1.json").await?;
    let content_type = envelope.content_type().unwrap_or_default();
    ensure(content_type.contains("json"), "content-type", || {
        format!("Expected a JSON content type, got '{}'", content_type)
    })?;
    ensure(envelope.json().is_some(), "body", || {
        "Expected the body to decode as JSON".to_owned()
    })?;
    Ok(())
}

async fn writes_are_rejected(ctx: CaseContext) -> AppResult<()> {
    let spec = RequestSpec::new(HttpMethod::Put, "item/1.json")
        .with_json(json!({ "title": "hnprobe" }))
        .with_retries(0);
    match ctx.client.api().request(&spec).await {
        Ok(envelope) => Err(AppError::validation(ValidationError::expectation(
            "status",
            format!("Expected the write to be refused, got {}", envelope.status),
        ))),
        Err(AppError::Api(err)) => {
            let client_errors: Vec<u16> = (400..500).collect();
            status_in(err.status(), &client_errors)?;
            Ok(())
        }
        Err(err) => Err(err),
    }
}

async fn hostile_ids_are_not_server_errors(ctx: CaseContext) -> AppResult<()> {
    for target in HOSTILE_ITEM_TARGETS {
        let spec = RequestSpec::get(target).with_retries(0);
        not_server_error(target, ctx.client.api().request(&spec).await.map(|_| ()))?;
    }
    not_server_error(
        HOSTILE_USER,
        ctx.client.fetch_user(HOSTILE_USER).await.map(|_| ()),
    )?;
    Ok(())
}

fn not_server_error(target: &str, result: AppResult<()>) -> AppResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(AppError::Api(err)) => {
            ensure(err.status() < 500, target, || {
                format!("Server failed with {} for '{}'", err.status(), target)
            })?;
            Ok(())
        }
        Err(err) => Err(err),
    }
}
