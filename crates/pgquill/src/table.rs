//! Table and column definitions.
//!
//! These carry only what the statement builders need: the table's name and
//! optional original name (for aliases), each column's declared and SQL name,
//! and the column's default expression.
//!
//! # Example
//!
//! ```ignore
//! use pgquill::{ColumnDef, Table};
//!
//! let foo = Table::define("foo")
//!     .column(ColumnDef::uuid("id").primary_key().default("gen_random_uuid()"))
//!     .column(ColumnDef::timestamp_tz("createDate").not_null().default("now()"))
//!     .column(ColumnDef::text("name").not_null())
//!     .column(ColumnDef::integer("value"));
//! ```

use crate::expr::{Expression, Selectable};
use crate::ident::{always_quote, quote, sql_name};
use crate::token::Token;
use std::sync::Arc;

/// A column declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    name: String,
    sql_name: String,
    data_type: String,
    not_null: bool,
    primary_key: bool,
    default_expr: Option<String>,
}

impl ColumnDef {
    /// Declare a column. `name` may be camelCase; its SQL name is snake_case.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            sql_name: sql_name(&name),
            name,
            data_type: data_type.into(),
            not_null: false,
            primary_key: false,
            default_expr: None,
        }
    }

    pub fn uuid(name: impl Into<String>) -> Self {
        Self::new(name, "uuid")
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, "text")
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, "integer")
    }

    pub fn bigint(name: impl Into<String>) -> Self {
        Self::new(name, "bigint")
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, "boolean")
    }

    pub fn double_precision(name: impl Into<String>) -> Self {
        Self::new(name, "double precision")
    }

    pub fn timestamp_tz(name: impl Into<String>) -> Self {
        Self::new(name, "timestamp with time zone")
    }

    pub fn jsonb(name: impl Into<String>) -> Self {
        Self::new(name, "jsonb")
    }

    pub fn bytea(name: impl Into<String>) -> Self {
        Self::new(name, "bytea")
    }

    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Mark as primary key (implies NOT NULL).
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    /// Set the default expression, e.g. `now()` or `gen_random_uuid()`.
    #[must_use]
    pub fn default(mut self, expr: impl Into<String>) -> Self {
        self.default_expr = Some(expr.into());
        self
    }

    /// Override the SQL name derived from the declared name.
    #[must_use]
    pub fn rename(mut self, sql_name: impl Into<String>) -> Self {
        self.sql_name = sql_name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_name(&self) -> &str {
        &self.sql_name
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn default_expr(&self) -> Option<&str> {
        self.default_expr.as_deref()
    }

    /// Whether a record key addresses this column (declared or SQL name).
    pub(crate) fn matches(&self, key: &str) -> bool {
        self.name == key || self.sql_name == key
    }

    /// Unqualified reference, aliased to the declared name when it differs:
    /// `create_date "createDate"`.
    pub(crate) fn aliased_reference(&self) -> String {
        if self.name == self.sql_name {
            quote(&self.sql_name).into_owned()
        } else {
            format!("{} {}", quote(&self.sql_name), always_quote(&self.name))
        }
    }
}

/// A table definition, optionally aliased.
///
/// Cheap to clone: the column list is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    original_name: Option<String>,
    columns: Arc<Vec<ColumnDef>>,
}

impl Table {
    pub fn define(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            original_name: None,
            columns: Arc::new(Vec::new()),
        }
    }

    /// Add a column declaration.
    #[must_use]
    pub fn column(mut self, def: ColumnDef) -> Self {
        Arc::make_mut(&mut self.columns).push(def);
        self
    }

    /// An aliased copy: `FROM <original> "<alias>"`, columns qualified by the alias.
    #[must_use]
    pub fn as_(&self, alias: impl Into<String>) -> Table {
        Table {
            name: alias.into(),
            original_name: Some(self.original_name.clone().unwrap_or_else(|| self.name.clone())),
            columns: Arc::clone(&self.columns),
        }
    }

    /// The name columns are qualified with (the alias, if any).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying table name when this is an alias.
    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Look up a column declaration by declared or SQL name.
    pub fn column_def(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.matches(name))
    }

    /// The declaration for `name`, or an ad-hoc untyped one if it isn't declared.
    pub(crate) fn resolve(&self, name: &str) -> ColumnDef {
        self.column_def(name)
            .cloned()
            .unwrap_or_else(|| ColumnDef::new(name, ""))
    }

    /// A qualified reference to one of this table's columns.
    ///
    /// Undeclared names still produce a reference (snake_cased); the database
    /// reports them if they don't exist.
    pub fn col(&self, name: &str) -> Column {
        Column::new(self, &self.resolve(name))
    }

    /// References to every declared column, in declaration order.
    pub fn all_columns(&self) -> Vec<Column> {
        self.columns.iter().map(|def| Column::new(self, def)).collect()
    }

    /// How this table is written after `FROM`/`JOIN`/`UPDATE`/…
    pub(crate) fn reference(&self) -> String {
        match &self.original_name {
            Some(original) => format!("{} {}", quote(original), always_quote(&self.name)),
            None => quote(&self.name).into_owned(),
        }
    }
}

/// A qualified column reference (`table.column`).
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    sql_name: String,
    qualifier: String,
}

impl Column {
    fn new(table: &Table, def: &ColumnDef) -> Self {
        Self {
            name: def.name.clone(),
            sql_name: def.sql_name.clone(),
            qualifier: quote(&table.name).into_owned(),
        }
    }

    /// Declared name (the key rows come back under).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_name(&self) -> &str {
        &self.sql_name
    }

    /// `table.column`
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.qualifier, quote(&self.sql_name))
    }

    /// Bare column name, as required by `USING (...)`.
    pub(crate) fn unqualified_token(&self) -> Token {
        Token::literal(quote(&self.sql_name))
    }
}

impl Expression for Column {
    fn to_tokens(&self) -> Vec<Token> {
        vec![Token::literal(self.qualified())]
    }
}

impl Selectable for Column {
    /// `table.column`, plus `"name"` when the declared name differs.
    fn select_token(&self) -> Token {
        if self.name == self.sql_name {
            Token::literal(self.qualified())
        } else {
            Token::literal(format!("{} {}", self.qualified(), always_quote(&self.name)))
        }
    }

    fn returning_key(&self) -> String {
        self.name.clone()
    }
}
