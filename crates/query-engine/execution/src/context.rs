//! The handle a unit of work uses to run statements inside its transaction.

use serde::de::DeserializeOwned;
use tracing::{info_span, Instrument};

use query_engine_sql::sql::string::Query;

use crate::connection::Connection;
use crate::error::Error;

/// Runs queries on the connection borrowed for one transaction.
pub struct ExecutionContext<'a, C> {
    connection: &'a mut C,
}

impl<'a, C: Connection> ExecutionContext<'a, C> {
    pub fn new(connection: &'a mut C) -> Self {
        ExecutionContext { connection }
    }

    /// Execute a query and decode each returned row into `R`.
    ///
    /// Rows come back in the order the database produced them. Database errors are
    /// passed through as they are.
    pub async fn query<R: DeserializeOwned>(&mut self, query: Query) -> Result<Vec<R>, Error> {
        tracing::info!(
            generated_sql = query.text(),
            params = ?query.values()
        );

        let records = self
            .connection
            .execute(&query)
            .instrument(info_span!("Execute query"))
            .await?;

        records
            .into_iter()
            .map(|record| {
                serde_json::from_value(serde_json::Value::Object(record)).map_err(Error::from)
            })
            .collect()
    }
}
