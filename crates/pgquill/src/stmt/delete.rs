//! DELETE statement builder.

use super::{AffectedRows, Rows, StatementCore, returning_list};
use crate::expr::Expression;
use crate::table::Table;
use crate::token::Token;
use std::marker::PhantomData;

/// A `DELETE` statement, standalone or following an `INSERT INTO` prefix.
pub struct DeleteStatement<S = AffectedRows> {
    pub(crate) core: StatementCore,
    table: Table,
    _shape: PhantomData<fn() -> S>,
}

impl<S> Clone for DeleteStatement<S> {
    fn clone(&self) -> Self {
        self.with_core(self.core.clone())
    }
}

impl_statement!(DeleteStatement);
impl_fetch_as!(DeleteStatement);

impl DeleteStatement<AffectedRows> {
    /// Append `DELETE FROM <table>` to `prefix`.
    pub(crate) fn new(prefix: StatementCore, table: &Table) -> Self {
        Self {
            core: prefix.append([
                Token::literal("DELETE FROM"),
                Token::literal(table.reference()),
            ]),
            table: table.clone(),
            _shape: PhantomData,
        }
    }
}

impl<S> DeleteStatement<S> {
    fn with_core<T>(&self, core: StatementCore) -> DeleteStatement<T> {
        DeleteStatement {
            core,
            table: self.table.clone(),
            _shape: PhantomData,
        }
    }

    /// `WHERE <condition>`; the condition is not parenthesized.
    pub fn r#where(&self, condition: &dyn Expression) -> Self {
        let mut tokens = vec![Token::literal("WHERE")];
        tokens.extend(condition.to_tokens());
        self.with_core(self.core.append(tokens))
    }

    /// `RETURNING <col>, ...`; the statement now resolves to rows.
    pub fn returning(&self, columns: &[&str]) -> DeleteStatement<Rows> {
        let (tokens, keys) = returning_list(&self.table, columns);
        self.with_core(self.core.append(tokens).with_returning_keys(keys))
    }
}
