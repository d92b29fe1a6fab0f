//! End-to-end scenarios for each call shape.

use std::convert::Infallible;
use std::future::ready;
use std::sync::atomic::Ordering;

use serde_json::{Value, json};
use settle::{CaughtError, Outcome, guard, wrap, wrap_async, wrap_pending, wrap_thenable};

use crate::common::{LegacyLookup, Query, Row, init_tracing, sample_rows};

#[test]
fn malformed_json_becomes_failure() {
    init_tracing();
    let outcome = wrap(|| serde_json::from_str::<Value>("{bad"));

    assert!(outcome.data().is_none());
    let error = outcome.into_error().expect("parse failure");
    assert!(
        error.message().contains("key must be a string"),
        "unexpected message: {}",
        error.message()
    );
    assert!(error.is::<serde_json::Error>());
}

#[test]
fn plain_value_becomes_success() {
    let outcome = guard(|| 42);
    assert_eq!(outcome.error().map(CaughtError::message), None);
    assert_eq!(outcome.into_data(), Some(42));
}

#[tokio::test]
async fn resolved_future_becomes_success() {
    init_tracing();
    let outcome = wrap_pending(ready(Ok::<_, Infallible>("ok"))).await;
    assert_eq!(outcome.into_parts().0, Some("ok"));
}

#[tokio::test]
async fn string_rejection_is_normalized() {
    init_tracing();
    let outcome = wrap_pending(async { Err::<(), _>("boom") }).await;
    assert_eq!(
        serde_json::to_value(&outcome).expect("serialize"),
        json!({ "data": null, "error": { "message": "boom" } })
    );
}

#[tokio::test]
async fn deferred_query_builder_resolves_to_rows() {
    init_tracing();
    let query = Query::table("users").min_id(2);
    let executed = query.executed_flag();

    let pending = wrap_pending(query);
    assert!(!executed.load(Ordering::SeqCst), "query ran before await");

    let rows = pending.await.into_data().expect("rows");
    assert!(executed.load(Ordering::SeqCst));
    assert_eq!(
        rows,
        vec![Row { id: 2, name: "grace" }, Row { id: 3, name: "linus" }]
    );
}

#[tokio::test]
async fn failing_query_builder_keeps_anyhow_message() {
    let outcome = wrap_pending(Query::table("orders")).await;
    let error = outcome.into_error().expect("missing table");
    assert_eq!(error.message(), "relation \"orders\" does not exist");
    assert!(error.is::<anyhow::Error>());
}

#[tokio::test]
async fn closure_returning_query_behaves_like_the_query() {
    let outcome = wrap_async(|| Query::table("users")).await;
    assert_eq!(outcome.into_data(), Some(sample_rows()));
}

#[tokio::test]
async fn callback_thenable_resolves_and_rejects() {
    init_tracing();
    let found = wrap_thenable(LegacyLookup { name: "ada" }).await;
    assert_eq!(found.data(), Some(&Row { id: 1, name: "ada" }));

    let missing: Outcome<Row> = wrap_thenable(LegacyLookup { name: "alan" }).await;
    assert_eq!(
        missing.error().map(CaughtError::message),
        Some("no row named alan")
    );
}
