//! Immutable statement builders.
//!
//! Every clause method takes `&self` and returns a new statement whose token
//! list is the receiver's list plus the clause's tokens. The receiver is never
//! touched, so a statement can be used as a template and branched freely:
//!
//! ```ignore
//! let base = db.select_from(&foo);
//! let newest = base.order_by(&[&foo.col("createDate").desc()]);
//! let named = base.r#where(&foo.col("name").eq("Test"));
//! ```
//!
//! Statements are awaitable. Awaiting serializes the tokens, runs them on the
//! database's executor and shapes the result by the statement's type
//! parameter:
//! - [`AffectedRows`] resolves to [`Affected`]
//! - [`Rows`] resolves to `Vec<Row>`, each row reduced to the declared keys
//!
//! Awaiting the same statement again runs it again.

#[macro_use]
mod exec_macros;

mod delete;
mod insert;
mod select;
mod update;

#[cfg(test)]
mod tests;

pub use delete::DeleteStatement;
pub use insert::InsertStatement;
pub use select::{Limit, SelectStatement};
pub use update::UpdateStatement;

use crate::db::Database;
use crate::error::QuillResult;
use crate::executor::QueryResult;
use crate::expr::Selectable;
use crate::ident::quote;
use crate::log::{self, StatementKind};
use crate::record::Record;
use crate::row::Row;
use crate::table::{ColumnDef, Table};
use crate::token::{SerializedQuery, Token, TokenList, serialize};
use crate::value::Value;
use std::sync::Arc;

/// How an awaited statement's raw result is presented.
pub trait ResultShape: Send + Sync + 'static {
    type Output: Send;

    fn shape(result: QueryResult, keys: &[String]) -> Self::Output;
}

/// Shape of statements without a projection: only the affected count.
#[derive(Debug, Clone, Copy)]
pub struct AffectedRows;

/// Shape of statements with a `SELECT` list or `RETURNING`.
#[derive(Debug, Clone, Copy)]
pub struct Rows;

/// Result of a statement without a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affected {
    pub affected_count: u64,
}

impl ResultShape for AffectedRows {
    type Output = Affected;

    fn shape(result: QueryResult, _keys: &[String]) -> Affected {
        Affected {
            affected_count: result.affected_count,
        }
    }
}

impl ResultShape for Rows {
    type Output = Vec<Row>;

    fn shape(result: QueryResult, keys: &[String]) -> Vec<Row> {
        if keys.is_empty() {
            return result.rows;
        }
        result.rows.iter().map(|row| row.project(keys)).collect()
    }
}

/// State shared by every statement kind.
#[derive(Clone)]
pub(crate) struct StatementCore {
    db: Database,
    kind: StatementKind,
    returning_keys: Arc<[String]>,
    tokens: TokenList,
}

impl StatementCore {
    pub(crate) fn new(
        db: Database,
        kind: StatementKind,
        tokens: Vec<Token>,
        returning_keys: Vec<String>,
    ) -> Self {
        Self {
            db,
            kind,
            returning_keys: returning_keys.into(),
            tokens: TokenList::from_tokens(tokens),
        }
    }

    pub(crate) fn append(&self, tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            db: self.db.clone(),
            kind: self.kind,
            returning_keys: Arc::clone(&self.returning_keys),
            tokens: self.tokens.append(tokens),
        }
    }

    pub(crate) fn with_returning_keys(mut self, keys: Vec<String>) -> Self {
        self.returning_keys = keys.into();
        self
    }

    pub(crate) fn tokens(&self) -> &TokenList {
        &self.tokens
    }

    pub(crate) fn returning_keys(&self) -> &[String] {
        &self.returning_keys
    }

    pub(crate) fn serialize(&self) -> SerializedQuery {
        serialize(&self.tokens)
    }

    /// Serialize and hand the query to the executor.
    pub(crate) async fn run(&self) -> QuillResult<QueryResult> {
        let query = self.serialize();
        log::emit_sql(&self.db.config, self.kind, &query.text, query.parameters.len());
        self.db
            .executor
            .execute(&query.text, &query.parameters)
            .await
    }

    pub(crate) async fn resolve<S: ResultShape>(&self) -> QuillResult<S::Output> {
        let result = self.run().await?;
        Ok(S::shape(result, &self.returning_keys))
    }
}

/// `SELECT <item>, <item>, ...` plus the keys rows come back under.
pub(crate) fn select_list(items: &[&dyn Selectable]) -> (Vec<Token>, Vec<String>) {
    let keys = items.iter().map(|item| item.returning_key()).collect();
    let tokens = vec![
        Token::literal("SELECT"),
        Token::comma_list(items.iter().map(|item| item.select_token()).collect()),
    ];
    (tokens, keys)
}

/// `RETURNING <col>, <col>, ...` plus the declared names of those columns.
pub(crate) fn returning_list(table: &Table, names: &[&str]) -> (Vec<Token>, Vec<String>) {
    let defs: Vec<ColumnDef> = names.iter().map(|name| table.resolve(name)).collect();
    let tokens = vec![
        Token::literal("RETURNING"),
        Token::comma_list(
            defs.iter()
                .map(|def| Token::literal(def.aliased_reference()))
                .collect(),
        ),
    ];
    let keys = defs.iter().map(|def| def.name().to_string()).collect();
    (tokens, keys)
}

/// The value a record holds for a column, by declared or SQL name.
pub(crate) fn record_value<'r>(record: &'r Record, def: &ColumnDef) -> Option<&'r Value> {
    record
        .get(def.name())
        .or_else(|| record.get(def.sql_name()))
}

/// Log record keys that match no declared column.
pub(crate) fn warn_unknown_keys(table: &Table, record: &Record) {
    for key in record.keys() {
        if table.column_def(key).is_none() {
            log::unknown_column(table.name(), key);
        }
    }
}

/// `col = $n` items for `SET` / `DO UPDATE SET`, in table declaration order.
pub(crate) fn assignments(table: &Table, patch: &Record) -> Token {
    warn_unknown_keys(table, patch);
    let items = table
        .columns()
        .iter()
        .filter_map(|def| {
            let value = record_value(patch, def)?;
            Some(Token::collection(vec![
                Token::literal(format!("{} =", quote(def.sql_name()))),
                Token::Parameter(value.clone()),
            ]))
        })
        .collect();
    Token::comma_list(items)
}
