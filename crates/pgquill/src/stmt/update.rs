//! UPDATE statement builder.

use super::{AffectedRows, Rows, StatementCore, assignments, returning_list};
use crate::expr::Expression;
use crate::record::Record;
use crate::table::Table;
use crate::token::Token;
use std::marker::PhantomData;

/// An `UPDATE` statement, standalone or following an `INSERT INTO` prefix.
pub struct UpdateStatement<S = AffectedRows> {
    pub(crate) core: StatementCore,
    table: Table,
    _shape: PhantomData<fn() -> S>,
}

impl<S> Clone for UpdateStatement<S> {
    fn clone(&self) -> Self {
        self.with_core(self.core.clone())
    }
}

impl_statement!(UpdateStatement);
impl_fetch_as!(UpdateStatement);

impl UpdateStatement<AffectedRows> {
    /// Append `UPDATE <table>` to `prefix`.
    pub(crate) fn new(prefix: StatementCore, table: &Table) -> Self {
        Self {
            core: prefix.append([Token::literal("UPDATE"), Token::literal(table.reference())]),
            table: table.clone(),
            _shape: PhantomData,
        }
    }
}

impl<S> UpdateStatement<S> {
    fn with_core<T>(&self, core: StatementCore) -> UpdateStatement<T> {
        UpdateStatement {
            core,
            table: self.table.clone(),
            _shape: PhantomData,
        }
    }

    /// `SET col = $n, ...` in table declaration order.
    pub fn set(&self, patch: Record) -> Self {
        self.with_core(
            self.core
                .append([Token::literal("SET"), assignments(&self.table, &patch)]),
        )
    }

    /// `WHERE <condition>`; the condition is not parenthesized.
    pub fn r#where(&self, condition: &dyn Expression) -> Self {
        let mut tokens = vec![Token::literal("WHERE")];
        tokens.extend(condition.to_tokens());
        self.with_core(self.core.append(tokens))
    }

    /// `RETURNING <col>, ...`; the statement now resolves to rows.
    pub fn returning(&self, columns: &[&str]) -> UpdateStatement<Rows> {
        let (tokens, keys) = returning_list(&self.table, columns);
        self.with_core(self.core.append(tokens).with_returning_keys(keys))
    }
}
