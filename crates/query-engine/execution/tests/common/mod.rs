//! An in-memory pool that records every call made through it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use query_engine_execution::{Connection, Error, Pool, Record};
use query_engine_sql::sql::string::{Param, Query};

/// What the runner did, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Acquire,
    Execute(String),
    Release(Option<String>),
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    rows: Vec<Record>,
    failing_statements: HashSet<String>,
    fail_acquire: bool,
}

/// Serves `SELECT`s from a single table of rows, filtering on `id` when a value is bound.
#[derive(Clone, Default)]
pub struct RecordingPool {
    state: Arc<Mutex<State>>,
}

impl RecordingPool {
    pub fn with_rows(rows: Vec<serde_json::Value>) -> Self {
        let pool = RecordingPool::default();
        pool.state.lock().unwrap().rows = rows
            .into_iter()
            .map(|row| match row {
                serde_json::Value::Object(record) => record,
                other => panic!("rows must be objects, got {other}"),
            })
            .collect();
        pool
    }

    /// Make every execution of `text` fail.
    pub fn fail_on(self, text: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_statements
            .insert(text.to_string());
        self
    }

    pub fn fail_acquire(self) -> Self {
        self.state.lock().unwrap().fail_acquire = true;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.lock().unwrap().events.clone()
    }
}

pub struct RecordingConnection {
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl Connection for RecordingConnection {
    async fn execute(&mut self, query: &Query) -> Result<Vec<Record>, Error> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Execute(query.text().to_string()));

        if state.failing_statements.contains(query.text()) {
            return Err(Error::Database(sqlx::Error::Protocol(format!(
                "{} rejected",
                query.text()
            ))));
        }
        if !query.text().starts_with("SELECT") {
            return Ok(vec![]);
        }

        let rows = match query.values() {
            [Param::Int8(id)] => state
                .rows
                .iter()
                .filter(|row| row.get("id") == Some(&serde_json::Value::from(*id)))
                .cloned()
                .collect(),
            _ => state.rows.clone(),
        };
        Ok(rows)
    }
}

#[async_trait]
impl Pool for RecordingPool {
    type Connection = RecordingConnection;

    async fn acquire(&self) -> Result<RecordingConnection, Error> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Acquire);
        if state.fail_acquire {
            return Err(Error::Acquire(sqlx::Error::PoolTimedOut));
        }
        Ok(RecordingConnection {
            state: self.state.clone(),
        })
    }

    async fn release(
        &self,
        _connection: RecordingConnection,
        error: Option<&(dyn std::error::Error + Send + Sync + 'static)>,
    ) {
        self.state
            .lock()
            .unwrap()
            .events
            .push(Event::Release(error.map(ToString::to_string)));
    }
}

pub fn execute(text: &str) -> Event {
    Event::Execute(text.to_string())
}
