//! SELECT statement builder.

use super::{AffectedRows, Rows, StatementCore};
use crate::expr::{Expression, Selectable};
use crate::ident::quote;
use crate::table::{Column, Table};
use crate::token::Token;
use std::marker::PhantomData;

/// Argument of [`SelectStatement::limit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// `LIMIT ALL`
    All,
    /// `LIMIT $n`
    Count(i64),
}

impl From<i64> for Limit {
    fn from(count: i64) -> Self {
        Limit::Count(count)
    }
}

/// A `SELECT` statement.
///
/// `S` is [`Rows`] unless [`affected_rows`](Self::affected_rows) switched it
/// to [`AffectedRows`].
pub struct SelectStatement<S = Rows> {
    pub(crate) core: StatementCore,
    _shape: PhantomData<fn() -> S>,
}

impl<S> Clone for SelectStatement<S> {
    fn clone(&self) -> Self {
        Self::from_core(self.core.clone())
    }
}

impl_statement!(SelectStatement);
impl_fetch_as!(SelectStatement);

/// Join flavours; all render the table the way `FROM` does.
fn join_tokens(keyword: &str, table: &Table) -> [Token; 2] {
    [Token::literal(keyword), Token::literal(table.reference())]
}

fn expression_list(keyword: &str, exprs: &[&dyn Expression]) -> [Token; 2] {
    [
        Token::literal(keyword),
        Token::comma_list(
            exprs
                .iter()
                .map(|expr| Token::collection(expr.to_tokens()))
                .collect(),
        ),
    ]
}

impl<S> SelectStatement<S> {
    pub(crate) fn from_core(core: StatementCore) -> Self {
        Self {
            core,
            _shape: PhantomData,
        }
    }

    fn push(&self, tokens: impl IntoIterator<Item = Token>) -> Self {
        Self::from_core(self.core.append(tokens))
    }

    /// Resolve to the affected count instead of rows, for
    /// `INSERT INTO ... SELECT` without `RETURNING`.
    pub fn affected_rows(&self) -> SelectStatement<AffectedRows> {
        SelectStatement::from_core(self.core.clone())
    }

    /// `FROM <table>`; aliased tables render as `<original> "<alias>"`.
    pub fn from(&self, table: &Table) -> Self {
        self.push([Token::literal("FROM"), Token::literal(table.reference())])
    }

    pub fn join(&self, table: &Table) -> Self {
        self.push(join_tokens("JOIN", table))
    }

    pub fn inner_join(&self, table: &Table) -> Self {
        self.push(join_tokens("INNER JOIN", table))
    }

    pub fn left_join(&self, table: &Table) -> Self {
        self.push(join_tokens("LEFT JOIN", table))
    }

    pub fn left_outer_join(&self, table: &Table) -> Self {
        self.push(join_tokens("LEFT OUTER JOIN", table))
    }

    pub fn right_join(&self, table: &Table) -> Self {
        self.push(join_tokens("RIGHT JOIN", table))
    }

    pub fn right_outer_join(&self, table: &Table) -> Self {
        self.push(join_tokens("RIGHT OUTER JOIN", table))
    }

    pub fn full_join(&self, table: &Table) -> Self {
        self.push(join_tokens("FULL JOIN", table))
    }

    pub fn full_outer_join(&self, table: &Table) -> Self {
        self.push(join_tokens("FULL OUTER JOIN", table))
    }

    /// `CROSS JOIN <table>`; takes no `ON`/`USING`.
    pub fn cross_join(&self, table: &Table) -> Self {
        self.push(join_tokens("CROSS JOIN", table))
    }

    /// `ON (<condition>)`
    pub fn on(&self, condition: &dyn Expression) -> Self {
        self.push([Token::literal("ON"), Token::group(condition.to_tokens())])
    }

    /// `USING (<col>, ...)` with bare column names.
    pub fn using(&self, columns: &[&Column]) -> Self {
        let items = columns
            .iter()
            .map(|column| Token::collection(vec![column.unqualified_token()]))
            .collect();
        self.push([
            Token::literal("USING"),
            Token::group(vec![Token::comma_list(items)]),
        ])
    }

    /// `WHERE <condition>`; the condition is not parenthesized.
    pub fn r#where(&self, condition: &dyn Expression) -> Self {
        let mut tokens = vec![Token::literal("WHERE")];
        tokens.extend(condition.to_tokens());
        self.push(tokens)
    }

    pub fn group_by(&self, exprs: &[&dyn Expression]) -> Self {
        self.push(expression_list("GROUP BY", exprs))
    }

    pub fn having(&self, conditions: &[&dyn Expression]) -> Self {
        self.push(expression_list("HAVING", conditions))
    }

    pub fn order_by(&self, exprs: &[&dyn Expression]) -> Self {
        self.push(expression_list("ORDER BY", exprs))
    }

    /// `LIMIT $n` or `LIMIT ALL`.
    pub fn limit(&self, limit: impl Into<Limit>) -> Self {
        match limit.into() {
            Limit::All => self.push([Token::literal("LIMIT ALL")]),
            Limit::Count(n) => self.push([Token::literal("LIMIT"), Token::param(n)]),
        }
    }

    pub fn offset(&self, start: i64) -> Self {
        self.push([Token::literal("OFFSET"), Token::param(start)])
    }

    /// `FETCH FIRST $n ROWS ONLY`
    pub fn fetch(&self, count: i64) -> Self {
        self.push([
            Token::literal("FETCH FIRST"),
            Token::param(count),
            Token::literal("ROWS ONLY"),
        ])
    }

    pub fn for_update(&self) -> Self {
        self.push([Token::literal("FOR UPDATE")])
    }

    pub fn for_no_key_update(&self) -> Self {
        self.push([Token::literal("FOR NO KEY UPDATE")])
    }

    pub fn for_share(&self) -> Self {
        self.push([Token::literal("FOR SHARE")])
    }

    pub fn for_key_share(&self) -> Self {
        self.push([Token::literal("FOR KEY SHARE")])
    }

    /// `OF <table>` after a locking clause.
    pub fn of(&self, table: &Table) -> Self {
        self.push([Token::literal("OF"), Token::literal(quote(table.name()))])
    }

    pub fn nowait(&self) -> Self {
        self.push([Token::literal("NOWAIT")])
    }

    pub fn skip_locked(&self) -> Self {
        self.push([Token::literal("SKIP LOCKED")])
    }
}

/// A select used as a subquery in another select list: `(<select>)`,
/// read back under its first key.
impl<S> Selectable for SelectStatement<S> {
    fn select_token(&self) -> Token {
        Token::group(self.core.tokens().to_vec())
    }

    fn returning_key(&self) -> String {
        self.core
            .returning_keys()
            .first()
            .cloned()
            .unwrap_or_default()
    }
}
