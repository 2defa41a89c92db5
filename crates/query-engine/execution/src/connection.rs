//! The pool and connection seams the transaction runner is written against.

use std::fmt;

use async_trait::async_trait;

use query_engine_sql::sql::string::Query;

use crate::error::Error;

/// A single result row, keyed by column name in the order the database returned them.
///
/// Column names are unique within a record; a result with a repeated name is rejected.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A live database session.
#[async_trait]
pub trait Connection: Send {
    /// Run a statement with its bound values and collect every row it returns.
    async fn execute(&mut self, query: &Query) -> Result<Vec<Record>, Error>;
}

/// A bounded set of reusable connections.
#[async_trait]
pub trait Pool: Send + Sync {
    type Connection: Connection;

    /// Wait for a free connection.
    async fn acquire(&self) -> Result<Self::Connection, Error>;

    /// Hand a connection back.
    ///
    /// `error` is set when the transaction using the connection failed, in which case the
    /// session may be in an inconsistent state.
    async fn release(
        &self,
        connection: Self::Connection,
        error: Option<&(dyn std::error::Error + Send + Sync + 'static)>,
    );
}

/// Transaction control statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Begin,
    Commit,
    Rollback,
}

impl Directive {
    pub fn as_sql(self) -> &'static str {
        match self {
            Directive::Begin => "BEGIN",
            Directive::Commit => "COMMIT",
            Directive::Rollback => "ROLLBACK",
        }
    }

    pub fn to_query(self) -> Query {
        Query::raw(self.as_sql())
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
