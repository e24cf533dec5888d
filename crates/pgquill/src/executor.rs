//! The database seam.
//!
//! Statements never talk to a connection directly. They hand the serialized
//! SQL and parameters to an [`Executor`], supplied once to
//! [`Database::new`](crate::Database::new) and shared by every statement
//! built from it.
//!
//! Implementations are provided for:
//! - `tokio_postgres::Client`
//! - `deadpool_postgres::Pool` (feature `pool`)
//! - any async closure, via [`from_fn`]

use crate::error::{QuillError, QuillResult};
use crate::row::Row;
use crate::value::Value;
use futures_core::Stream;
use futures_core::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// Raw result of one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub affected_count: u64,
}

impl QueryResult {
    pub fn new(rows: Vec<Row>, affected_count: u64) -> Self {
        Self {
            rows,
            affected_count,
        }
    }

    /// A result carrying only an affected-row count.
    pub fn affected(affected_count: u64) -> Self {
        Self::new(Vec::new(), affected_count)
    }

    /// A result carrying rows; the affected count is the number of rows.
    pub fn rows(rows: Vec<Row>) -> Self {
        let affected_count = rows.len() as u64;
        Self::new(rows, affected_count)
    }
}

/// Runs SQL text with `$n` parameters.
pub trait Executor: Send + Sync {
    fn execute<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [Value],
    ) -> BoxFuture<'a, QuillResult<QueryResult>>;
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn execute<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [Value],
    ) -> BoxFuture<'a, QuillResult<QueryResult>> {
        (**self).execute(sql, params)
    }
}

/// Executor backed by a closure. See [`from_fn`].
#[derive(Clone)]
pub struct FnExecutor<F> {
    f: F,
}

/// Wrap an async closure as an [`Executor`].
///
/// ```ignore
/// let db = Database::new(pgquill::from_fn(|sql, params| async move {
///     println!("{sql} {params:?}");
///     Ok(QueryResult::affected(0))
/// }));
/// ```
pub fn from_fn<F, Fut>(f: F) -> FnExecutor<F>
where
    F: Fn(String, Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = QuillResult<QueryResult>> + Send + 'static,
{
    FnExecutor { f }
}

impl<F, Fut> Executor for FnExecutor<F>
where
    F: Fn(String, Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = QuillResult<QueryResult>> + Send + 'static,
{
    fn execute<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [Value],
    ) -> BoxFuture<'a, QuillResult<QueryResult>> {
        Box::pin((self.f)(sql.to_string(), params.to_vec()))
    }
}

impl Executor for tokio_postgres::Client {
    fn execute<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [Value],
    ) -> BoxFuture<'a, QuillResult<QueryResult>> {
        Box::pin(async move {
            let refs: Vec<&(dyn ToSql + Sync)> =
                params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
            let stream = tokio_postgres::Client::query_raw(self, sql, refs.iter().copied())
                .await
                .map_err(QuillError::from_db_error)?;
            let mut stream = std::pin::pin!(stream);

            let mut rows = Vec::new();
            while let Some(row) = std::future::poll_fn(|cx| stream.as_mut().poll_next(cx)).await {
                let row = row.map_err(QuillError::from_db_error)?;
                rows.push(Row::from_pg(&row)?);
            }

            let affected_count = stream.rows_affected().unwrap_or(rows.len() as u64);
            Ok(QueryResult::new(rows, affected_count))
        })
    }
}

#[cfg(feature = "pool")]
impl Executor for deadpool_postgres::Pool {
    fn execute<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [Value],
    ) -> BoxFuture<'a, QuillResult<QueryResult>> {
        Box::pin(async move {
            let client = self.get().await?;
            // Object -> ClientWrapper -> tokio_postgres::Client
            let client: &tokio_postgres::Client = &client;
            Executor::execute(client, sql, params).await
        })
    }
}
