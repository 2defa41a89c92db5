//! [`Pool`] and [`Connection`] backed by sqlx's PostgreSQL driver.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgArguments, PgColumn, PgRow};
use sqlx::{Column, Connection as _, Postgres, Row, TypeInfo, ValueRef};

use query_engine_sql::sql::string::{Param, Query};

use crate::connection::{Connection, Pool, Record};
use crate::error::Error;

#[async_trait]
impl Pool for sqlx::PgPool {
    type Connection = PoolConnection<Postgres>;

    async fn acquire(&self) -> Result<Self::Connection, Error> {
        sqlx::Pool::acquire(self).await.map_err(Error::Acquire)
    }

    /// Healthy connections go back to the pool. A connection released with an error is
    /// detached and closed instead, so its session is never reused.
    async fn release(
        &self,
        connection: Self::Connection,
        error: Option<&(dyn std::error::Error + Send + Sync + 'static)>,
    ) {
        match error {
            None => drop(connection),
            Some(error) => {
                tracing::warn!(%error, "closing connection released after a failed transaction");
                if let Err(close_error) = connection.detach().close().await {
                    tracing::warn!(error = %close_error, "unable to close connection");
                }
            }
        }
    }
}

#[async_trait]
impl Connection for PoolConnection<Postgres> {
    async fn execute(&mut self, query: &Query) -> Result<Vec<Record>, Error> {
        let rows: Vec<PgRow> = build_query_with_params(query)
            .fetch_all(&mut **self)
            .await?;

        rows.iter().map(row_to_record).collect()
    }
}

/// Create a SQLx query based on our SQL query and bind our parameters to it.
fn build_query_with_params(query: &Query) -> sqlx::query::Query<'_, Postgres, PgArguments> {
    query
        .values()
        .iter()
        .fold(sqlx::query(query.text()), |sqlx_query, param| match param {
            Param::Int8(i) => sqlx_query.bind(*i),
            Param::String(s) => sqlx_query.bind(s.as_str()),
            Param::Bool(b) => sqlx_query.bind(*b),
            Param::Value(v) => sqlx_query.bind(v),
        })
}

/// Turn a postgres row into a column name to json value mapping, keeping the column order.
/// Two columns with the same name are an error rather than one silently replacing the other.
fn row_to_record(row: &PgRow) -> Result<Record, Error> {
    let mut record = Record::with_capacity(row.columns().len());
    for column in row.columns() {
        let value = column_value(row, column)?;
        if record.insert(column.name().to_string(), value).is_some() {
            return Err(Error::DuplicateColumn {
                column: column.name().to_string(),
            });
        }
    }
    Ok(record)
}

fn column_value(row: &PgRow, column: &PgColumn) -> Result<serde_json::Value, Error> {
    let index = column.ordinal();
    if row.try_get_raw(index)?.is_null() {
        return Ok(serde_json::Value::Null);
    }

    let value = match column.type_info().name() {
        "BOOL" => serde_json::Value::Bool(row.try_get::<bool, _>(index)?),
        "INT2" => row.try_get::<i16, _>(index)?.into(),
        "INT4" => row.try_get::<i32, _>(index)?.into(),
        "INT8" => row.try_get::<i64, _>(index)?.into(),
        "FLOAT4" => finite_number(column, f64::from(row.try_get::<f32, _>(index)?))?,
        "FLOAT8" => finite_number(column, row.try_get::<f64, _>(index)?)?,
        // sqlx reports `bpchar` (`char(n)`) as CHAR
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" => {
            serde_json::Value::String(row.try_get::<String, _>(index)?)
        }
        "JSON" | "JSONB" => row.try_get::<serde_json::Value, _>(index)?,
        "UUID" => serde_json::Value::String(row.try_get::<uuid::Uuid, _>(index)?.to_string()),
        type_name => {
            return Err(Error::UnsupportedColumnType {
                column: column.name().to_string(),
                type_name: type_name.to_string(),
            })
        }
    };
    Ok(value)
}

/// JSON has no NaN or infinities, and mapping them to `null` would read as SQL NULL.
fn finite_number(column: &PgColumn, value: f64) -> Result<serde_json::Value, Error> {
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .ok_or_else(|| Error::NonFiniteFloat {
            column: column.name().to_string(),
            value,
        })
}
