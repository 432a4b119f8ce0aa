//! An in-memory stand-in for a database, for tests that need a [`ConnectableResource`].

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;

use crate::connection::{ConnectableResource, Connection, QueryResult, ResultColumn, Row, SqlValue};
use crate::{DriverError, Result};

/// Installs a tracing subscriber that honours `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Clone)]
enum Scripted {
    Rows(QueryResult),
    Affected(u64),
    Failure(String),
    Description(Vec<ResultColumn>),
}

/// A scripted resource. Responses are matched by the first registered SQL fragment the
/// statement contains, every statement is logged. Unscripted queries return no rows and
/// unscripted statements affect nothing.
///
/// Clones share their script and log, so a test can keep one while a session owns another.
#[derive(Clone, Default)]
pub struct FakeResource {
    state: Arc<FakeState>,
}

#[derive(Default)]
struct FakeState {
    script: Mutex<Vec<(String, Scripted)>>,
    log: Mutex<Vec<(String, Vec<SqlValue>)>>,
    acquired: AtomicUsize,
    invalid: AtomicBool,
    closed: AtomicBool,
}

impl FakeResource {
    pub fn new() -> Self {
        init_tracing();
        Self::default()
    }

    fn push(&self, fragment: &str, response: Scripted) {
        self.state
            .script
            .lock()
            .unwrap()
            .push((fragment.to_string(), response));
    }

    pub fn with_rows(self, fragment: &str, rows: Vec<Vec<SqlValue>>) -> Self {
        self.with_result(fragment, &[], rows)
    }

    pub fn with_result(self, fragment: &str, columns: &[&str], rows: Vec<Vec<SqlValue>>) -> Self {
        self.push(
            fragment,
            Scripted::Rows(QueryResult {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows: rows.into_iter().map(Row::new).collect(),
            }),
        );
        self
    }

    pub fn with_affected(self, fragment: &str, affected: u64) -> Self {
        self.push(fragment, Scripted::Affected(affected));
        self
    }

    pub fn with_failure(self, fragment: &str, message: &str) -> Self {
        self.push(fragment, Scripted::Failure(message.to_string()));
        self
    }

    pub fn with_description(self, fragment: &str, columns: Vec<ResultColumn>) -> Self {
        self.push(fragment, Scripted::Description(columns));
        self
    }

    pub fn set_valid(&self, valid: bool) {
        self.state.invalid.store(!valid, Ordering::SeqCst);
    }

    /// Every statement run so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.state
            .log
            .lock()
            .unwrap()
            .iter()
            .map(|(sql, _)| sql.clone())
            .collect()
    }

    /// The parameters of the first logged statement containing `fragment`.
    pub fn params_of(&self, fragment: &str) -> Option<Vec<SqlValue>> {
        self.state
            .log
            .lock()
            .unwrap()
            .iter()
            .find(|(sql, _)| sql.contains(fragment))
            .map(|(_, params)| params.clone())
    }

    pub fn acquire_count(&self) -> usize {
        self.state.acquired.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::SeqCst)
    }

    fn respond(&self, sql: &str, params: &[SqlValue]) -> Option<Scripted> {
        self.state
            .log
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));

        self.state
            .script
            .lock()
            .unwrap()
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
    }
}

#[async_trait]
impl ConnectableResource for FakeResource {
    async fn acquire(&self) -> Result<Box<dyn Connection>> {
        if self.is_closed() {
            return Err(DriverError::Connection("resource is closed".to_string()));
        }

        self.state.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeConnection {
            resource: self.clone(),
        }))
    }

    async fn is_valid(&self) -> bool {
        !self.is_closed() && !self.state.invalid.load(Ordering::SeqCst)
    }

    async fn close(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
    }
}

struct FakeConnection {
    resource: FakeResource,
}

#[async_trait]
impl Connection for FakeConnection {
    async fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<QueryResult> {
        match self.resource.respond(sql, params) {
            Some(Scripted::Rows(result)) => Ok(result),
            Some(Scripted::Failure(message)) => Err(DriverError::Execution(message)),
            _ => Ok(QueryResult::default()),
        }
    }

    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        match self.resource.respond(sql, params) {
            Some(Scripted::Affected(affected)) => Ok(affected),
            Some(Scripted::Failure(message)) => Err(DriverError::Execution(message)),
            _ => Ok(0),
        }
    }

    async fn describe(&mut self, sql: &str) -> Result<Vec<ResultColumn>> {
        match self.resource.respond(sql, &[]) {
            Some(Scripted::Description(columns)) => Ok(columns),
            Some(Scripted::Failure(message)) => Err(DriverError::Execution(message)),
            _ => Ok(vec![]),
        }
    }
}
