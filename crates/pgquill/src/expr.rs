//! Expression layer for WHERE/HAVING/ON conditions, ordering and projections.
//!
//! Anything that can write itself as a token sequence is an [`Expression`].
//! Columns are expressions; [`ExpressionExt`] layers comparison, boolean,
//! ordering and aggregate helpers on top of every expression:
//!
//! ```ignore
//! use pgquill::ExpressionExt;
//!
//! let cond = foo.col("value").lt(123).and(&foo.col("name").is_not_null());
//! // (foo.value < $1 AND foo.name IS NOT NULL)
//! ```
//!
//! Values are always bound as parameters; only identifiers and keywords end
//! up in the SQL text.

use crate::ident::always_quote;
use crate::token::Token;
use crate::value::Value;

/// Anything that can write itself as tokens.
pub trait Expression: Send + Sync {
    fn to_tokens(&self) -> Vec<Token>;
}

/// A composed expression.
#[derive(Debug, Clone)]
pub struct Expr {
    tokens: Vec<Token>,
}

impl Expr {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Raw SQL, emitted verbatim. Never put user input here.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::from_tokens(vec![Token::literal(sql)])
    }

    /// A bound value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::from_tokens(vec![Token::param(value)])
    }
}

impl Expression for Expr {
    fn to_tokens(&self) -> Vec<Token> {
        self.tokens.clone()
    }
}

/// `expr "alias"`, usable in a select list.
#[derive(Debug, Clone)]
pub struct Aliased {
    tokens: Vec<Token>,
    alias: String,
}

impl Aliased {
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

/// Raw SQL expression.
pub fn raw(sql: impl Into<String>) -> Expr {
    Expr::raw(sql)
}

/// `COUNT(*)`
pub fn count_all() -> Expr {
    Expr::raw("COUNT(*)")
}

fn binary<E: Expression + ?Sized>(lhs: &E, op: &str, value: Value) -> Expr {
    let mut tokens = lhs.to_tokens();
    tokens.push(Token::literal(op));
    tokens.push(Token::Parameter(value));
    Expr::from_tokens(tokens)
}

fn suffixed<E: Expression + ?Sized>(lhs: &E, suffix: &str) -> Expr {
    let mut tokens = lhs.to_tokens();
    tokens.push(Token::literal(suffix));
    Expr::from_tokens(tokens)
}

fn call<E: Expression + ?Sized>(function: &str, arg: &E) -> Expr {
    Expr::from_tokens(vec![Token::literal(function), Token::group(arg.to_tokens())])
}

fn connective<E: Expression + ?Sized>(lhs: &E, op: &str, rhs: &dyn Expression) -> Expr {
    let mut tokens = lhs.to_tokens();
    tokens.push(Token::literal(op));
    tokens.extend(rhs.to_tokens());
    Expr::from_tokens(vec![Token::group(tokens)])
}

/// Operators available on every [`Expression`].
pub trait ExpressionExt: Expression {
    /// `lhs = $n`
    fn eq(&self, value: impl Into<Value>) -> Expr {
        binary(self, "=", value.into())
    }

    /// `lhs <> $n`
    fn ne(&self, value: impl Into<Value>) -> Expr {
        binary(self, "<>", value.into())
    }

    fn gt(&self, value: impl Into<Value>) -> Expr {
        binary(self, ">", value.into())
    }

    fn gte(&self, value: impl Into<Value>) -> Expr {
        binary(self, ">=", value.into())
    }

    fn lt(&self, value: impl Into<Value>) -> Expr {
        binary(self, "<", value.into())
    }

    fn lte(&self, value: impl Into<Value>) -> Expr {
        binary(self, "<=", value.into())
    }

    fn like(&self, pattern: impl Into<Value>) -> Expr {
        binary(self, "LIKE", pattern.into())
    }

    fn ilike(&self, pattern: impl Into<Value>) -> Expr {
        binary(self, "ILIKE", pattern.into())
    }

    /// `lhs = rhs` between two expressions, e.g. a join condition.
    fn eq_expr(&self, rhs: &dyn Expression) -> Expr {
        let mut tokens = self.to_tokens();
        tokens.push(Token::literal("="));
        tokens.extend(rhs.to_tokens());
        Expr::from_tokens(tokens)
    }

    fn is_null(&self) -> Expr {
        suffixed(self, "IS NULL")
    }

    fn is_not_null(&self) -> Expr {
        suffixed(self, "IS NOT NULL")
    }

    /// `lhs IN ($1, $2, ...)`. An empty list matches nothing.
    fn in_list<V, I>(&self, values: I) -> Expr
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let params: Vec<Token> = values.into_iter().map(Token::param).collect();
        let list = if params.is_empty() {
            vec![Token::literal("NULL")]
        } else {
            vec![Token::comma_list(params)]
        };
        let mut tokens = self.to_tokens();
        tokens.push(Token::literal("IN"));
        tokens.push(Token::group(list));
        Expr::from_tokens(tokens)
    }

    /// `lhs BETWEEN $n AND $m`
    fn between(&self, from: impl Into<Value>, to: impl Into<Value>) -> Expr {
        let mut tokens = self.to_tokens();
        tokens.push(Token::literal("BETWEEN"));
        tokens.push(Token::param(from));
        tokens.push(Token::literal("AND"));
        tokens.push(Token::param(to));
        Expr::from_tokens(tokens)
    }

    /// `(lhs AND rhs)`
    fn and(&self, rhs: &dyn Expression) -> Expr {
        connective(self, "AND", rhs)
    }

    /// `(lhs OR rhs)`
    fn or(&self, rhs: &dyn Expression) -> Expr {
        connective(self, "OR", rhs)
    }

    /// `NOT (lhs)`
    fn not(&self) -> Expr {
        call("NOT", self)
    }

    fn asc(&self) -> Expr {
        suffixed(self, "ASC")
    }

    fn desc(&self) -> Expr {
        suffixed(self, "DESC")
    }

    fn nulls_first(&self) -> Expr {
        suffixed(self, "NULLS FIRST")
    }

    fn nulls_last(&self) -> Expr {
        suffixed(self, "NULLS LAST")
    }

    fn count(&self) -> Expr {
        call("COUNT", self)
    }

    fn sum(&self) -> Expr {
        call("SUM", self)
    }

    fn min(&self) -> Expr {
        call("MIN", self)
    }

    fn max(&self) -> Expr {
        call("MAX", self)
    }

    fn avg(&self) -> Expr {
        call("AVG", self)
    }

    /// Name this expression in a select list.
    fn as_(&self, alias: impl Into<String>) -> Aliased {
        Aliased {
            tokens: self.to_tokens(),
            alias: alias.into(),
        }
    }
}

impl<T: Expression + ?Sized> ExpressionExt for T {}

/// An item of a `SELECT` list.
///
/// `returning_key` is the key the item's value comes back under in each row.
pub trait Selectable: Send + Sync {
    fn select_token(&self) -> Token;
    fn returning_key(&self) -> String;
}

impl Selectable for Aliased {
    fn select_token(&self) -> Token {
        let mut tokens = self.tokens.clone();
        tokens.push(Token::literal(always_quote(&self.alias)));
        Token::collection(tokens)
    }

    fn returning_key(&self) -> String {
        self.alias.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnDef, Table};
    use crate::token::{TokenList, serialize};

    fn render(expr: &dyn Expression) -> (String, Vec<Value>) {
        let q = serialize(&TokenList::from_tokens(expr.to_tokens()));
        (q.text, q.parameters)
    }

    fn foo() -> Table {
        Table::define("foo")
            .column(ColumnDef::uuid("id"))
            .column(ColumnDef::text("name"))
            .column(ColumnDef::integer("value"))
    }

    #[test]
    fn comparison_binds_the_value() {
        let foo = foo();
        let (sql, params) = render(&foo.col("value").lt(123));
        assert_eq!(sql, "foo.value < $1");
        assert_eq!(params, vec![Value::Int(123)]);
    }

    #[test]
    fn boolean_connectives_group() {
        let foo = foo();
        let cond = foo
            .col("value")
            .gte(1)
            .and(&foo.col("name").eq("a").or(&foo.col("name").is_null()));
        let (sql, params) = render(&cond);
        assert_eq!(sql, "(foo.value >= $1 AND (foo.name = $2 OR foo.name IS NULL))");
        assert_eq!(params, vec![Value::Int(1), Value::Text("a".into())]);

        let (sql, _) = render(&foo.col("value").is_not_null().not());
        assert_eq!(sql, "NOT (foo.value IS NOT NULL)");
    }

    #[test]
    fn in_list_and_between() {
        let foo = foo();
        let (sql, params) = render(&foo.col("value").in_list([1, 2, 3]));
        assert_eq!(sql, "foo.value IN ($1, $2, $3)");
        assert_eq!(params.len(), 3);

        let (sql, params) = render(&foo.col("value").in_list(Vec::<i64>::new()));
        assert_eq!(sql, "foo.value IN (NULL)");
        assert!(params.is_empty());

        let (sql, _) = render(&foo.col("value").between(1, 10));
        assert_eq!(sql, "foo.value BETWEEN $1 AND $2");
    }

    #[test]
    fn ordering_and_aggregates() {
        let foo = foo();
        assert_eq!(render(&foo.col("value").desc().nulls_last()).0, "foo.value DESC NULLS LAST");
        assert_eq!(render(&foo.col("id").count()).0, "COUNT (foo.id)");
        assert_eq!(render(&count_all()).0, "COUNT(*)");
    }

    #[test]
    fn join_conditions_compare_columns() {
        let foo = foo();
        let bar = Table::define("bar").column(ColumnDef::uuid("fooId"));
        assert_eq!(
            render(&bar.col("fooId").eq_expr(&foo.col("id"))).0,
            "bar.foo_id = foo.id"
        );
    }

    #[test]
    fn aliased_select_items() {
        let foo = foo();
        let total = foo.col("value").sum().as_("total");
        assert_eq!(total.returning_key(), "total");
        let q = serialize(&TokenList::from_tokens(vec![total.select_token()]));
        assert_eq!(q.text, "SUM (foo.value) \"total\"");
    }
}
