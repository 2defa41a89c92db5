//! Run a unit of work inside a single database transaction.

use std::future::Future;
use std::pin::Pin;

use tracing::{info_span, Instrument};

use crate::connection::{Connection, Directive, Pool};
use crate::context::ExecutionContext;
use crate::error::Error;

/// The future a unit of work returns. It may borrow the execution context it was given.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Acquire a connection, run `unit_of_work` between `BEGIN` and `COMMIT`, and release the
/// connection.
///
/// If `BEGIN`, the unit of work or `COMMIT` fails, a `ROLLBACK` is issued (when the
/// transaction was opened), the connection is released with the error attached and the
/// same error is returned. Nothing is retried.
///
/// ```no_run
/// # async fn example(pool: sqlx::PgPool) -> Result<(), query_engine_execution::Error> {
/// use query_engine_execution::{transaction, Record};
/// use query_engine_sql::sql::string::Query;
///
/// let _rows = transaction::run(&pool, |mut context| {
///     Box::pin(async move {
///         context
///             .query::<Record>(Query::raw("SELECT * FROM foo WHERE TRUE"))
///             .await
///     })
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn run<P, F, T, E>(pool: &P, unit_of_work: F) -> Result<T, E>
where
    P: Pool,
    F: for<'c> FnOnce(ExecutionContext<'c, P::Connection>) -> BoxFuture<'c, Result<T, E>> + Send,
    T: Send,
    E: From<Error> + std::error::Error + Send + Sync + 'static,
{
    async move {
        let mut connection = pool.acquire().await?;

        if let Err(error) = execute_directive(&mut connection, Directive::Begin).await {
            let error = E::from(error);
            pool.release(connection, Some(error_marker(&error))).await;
            return Err(error);
        }

        let outcome = match unit_of_work(ExecutionContext::new(&mut connection)).await {
            Ok(value) => execute_directive(&mut connection, Directive::Commit)
                .await
                .map(|()| value)
                .map_err(E::from),
            Err(error) => Err(error),
        };

        match outcome {
            Ok(value) => {
                pool.release(connection, None).await;
                Ok(value)
            }
            Err(error) => {
                tracing::warn!(%error, "transaction failed");
                if let Err(rollback_error) =
                    execute_directive(&mut connection, Directive::Rollback).await
                {
                    tracing::warn!(error = %rollback_error, "rollback failed");
                }
                pool.release(connection, Some(error_marker(&error))).await;
                Err(error)
            }
        }
    }
    .instrument(info_span!("transaction"))
    .await
}

async fn execute_directive<C: Connection>(
    connection: &mut C,
    directive: Directive,
) -> Result<(), Error> {
    tracing::info!(%directive);
    connection
        .execute(&directive.to_query())
        .await
        .map(|_rows| ())
        .map_err(|error| {
            tracing::warn!(%directive, %error, "transaction directive failed");
            error
        })
}

fn error_marker<E>(error: &E) -> &(dyn std::error::Error + Send + Sync + 'static)
where
    E: std::error::Error + Send + Sync + 'static,
{
    error
}
