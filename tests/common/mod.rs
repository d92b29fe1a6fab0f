//! Shared test utilities and fixtures
//!
//! A deferred query builder (the `IntoFuture` kind of pending value) and a
//! callback-style legacy client (the `Thenable` kind).

#![allow(dead_code)]

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::anyhow;
use settle::{OnReject, OnResolve, Thenable};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness. Set `RUST_LOG=settle=debug`
/// to see every captured failure.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub name: &'static str,
}

pub fn sample_rows() -> Vec<Row> {
    vec![
        Row { id: 1, name: "ada" },
        Row { id: 2, name: "grace" },
        Row { id: 3, name: "linus" },
    ]
}

/// A query that only runs once it is awaited.
pub struct Query {
    table: &'static str,
    min_id: u32,
    executed: Arc<AtomicBool>,
}

impl Query {
    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            min_id: 0,
            executed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn min_id(mut self, min_id: u32) -> Self {
        self.min_id = min_id;
        self
    }

    pub fn executed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.executed)
    }
}

impl IntoFuture for Query {
    type Output = anyhow::Result<Vec<Row>>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            tokio::task::yield_now().await;
            self.executed.store(true, Ordering::SeqCst);
            if self.table != "users" {
                return Err(anyhow!("relation \"{}\" does not exist", self.table));
            }
            Ok(sample_rows()
                .into_iter()
                .filter(|row| row.id >= self.min_id)
                .collect())
        })
    }
}

/// A client that reports results through continuations on a worker thread.
pub struct LegacyLookup {
    pub name: &'static str,
}

impl Thenable for LegacyLookup {
    type Value = Row;
    type Reason = String;

    fn then(self, on_resolve: OnResolve<Row>, on_reject: OnReject<String>) {
        std::thread::spawn(move || {
            match sample_rows().into_iter().find(|row| row.name == self.name) {
                Some(row) => on_resolve(row),
                None => on_reject(format!("no row named {}", self.name)),
            }
        });
    }
}
