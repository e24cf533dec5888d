//! INSERT statement builder, including the `INSERT ... SELECT`,
//! `INSERT ... UPDATE` and `INSERT ... DELETE` forms.

use super::{
    AffectedRows, DeleteStatement, Rows, SelectStatement, StatementCore, UpdateStatement,
    assignments, record_value, returning_list, select_list, warn_unknown_keys,
};
use crate::db::Database;
use crate::expr::Selectable;
use crate::ident::quote;
use crate::log::StatementKind;
use crate::record::{IntoRecords, Record};
use crate::table::{ColumnDef, Table};
use crate::token::Token;
use std::marker::PhantomData;
use std::sync::Arc;

/// An `INSERT` statement.
///
/// Resolves to [`Affected`](super::Affected) until `.returning(...)` turns it
/// into a row-returning statement.
pub struct InsertStatement<S = AffectedRows> {
    pub(crate) core: StatementCore,
    table: Table,
    columns: Option<Arc<[ColumnDef]>>,
    default_values: bool,
    _shape: PhantomData<fn() -> S>,
}

impl<S> Clone for InsertStatement<S> {
    fn clone(&self) -> Self {
        self.with_core(self.core.clone())
    }
}

impl_statement!(InsertStatement);
impl_fetch_as!(InsertStatement);

/// `INSERT INTO` target; an aliased table is written `<original> AS <alias>`.
fn insert_target(table: &Table) -> String {
    match table.original_name() {
        Some(original) => format!("{} AS {}", quote(original), quote(table.name())),
        None => quote(table.name()).into_owned(),
    }
}

fn column_group(columns: &[&ColumnDef]) -> Token {
    Token::group(vec![Token::comma_list(
        columns
            .iter()
            .map(|def| Token::literal(quote(def.sql_name())))
            .collect(),
    )])
}

/// One cell of a `VALUES` row: the record's value, else the column default,
/// else `DEFAULT`.
fn cell(record: &Record, def: &ColumnDef) -> Token {
    match record_value(record, def) {
        Some(value) => Token::Parameter(value.clone()),
        None => Token::literal(def.default_expr().unwrap_or("DEFAULT")),
    }
}

impl InsertStatement<AffectedRows> {
    pub(crate) fn new(db: Database, table: &Table, columns: Option<&[&str]>) -> Self {
        let columns: Option<Arc<[ColumnDef]>> =
            columns.map(|names| names.iter().map(|name| table.resolve(name)).collect());

        let mut tokens = vec![Token::literal(format!("INSERT INTO {}", insert_target(table)))];
        if let Some(columns) = &columns {
            let refs: Vec<&ColumnDef> = columns.iter().collect();
            tokens.push(column_group(&refs));
        }

        Self {
            core: StatementCore::new(db, StatementKind::Insert, tokens, Vec::new()),
            table: table.clone(),
            columns,
            default_values: false,
            _shape: PhantomData,
        }
    }
}

impl<S> InsertStatement<S> {
    fn with_core<T>(&self, core: StatementCore) -> InsertStatement<T> {
        InsertStatement {
            core,
            table: self.table.clone(),
            columns: self.columns.clone(),
            default_values: self.default_values,
            _shape: PhantomData,
        }
    }

    fn push(&self, tokens: impl IntoIterator<Item = Token>) -> Self {
        self.with_core(self.core.append(tokens))
    }

    /// `VALUES (...), (...)`, one group per record in input order.
    ///
    /// Without explicit insert columns, the column list is every declared
    /// column that at least one record sets, in declaration order. Records
    /// that don't set a listed column get its default expression, or
    /// `DEFAULT`. If no column is set at all this becomes `DEFAULT VALUES`.
    ///
    /// Does nothing once [`default_values`](Self::default_values) was called.
    pub fn values(&self, records: impl IntoRecords) -> Self {
        if self.default_values {
            return self.clone();
        }
        let records = records.into_records();
        for record in &records {
            warn_unknown_keys(&self.table, record);
        }

        let mut tokens = Vec::with_capacity(3);
        let columns: Vec<&ColumnDef> = match &self.columns {
            Some(explicit) => explicit.iter().collect(),
            None => {
                let present: Vec<&ColumnDef> = self
                    .table
                    .columns()
                    .iter()
                    .filter(|def| records.iter().any(|r| record_value(r, def).is_some()))
                    .collect();
                if present.is_empty() {
                    return self.default_values();
                }
                tokens.push(column_group(&present));
                present
            }
        };

        let rows = records
            .iter()
            .map(|record| {
                let cells = columns.iter().map(|def| cell(record, def)).collect();
                Token::group(vec![Token::comma_list(cells)])
            })
            .collect();
        tokens.push(Token::literal("VALUES"));
        tokens.push(Token::comma_list(rows));
        self.push(tokens)
    }

    /// `DEFAULT VALUES`; later `values(...)` calls are ignored.
    pub fn default_values(&self) -> Self {
        let mut stmt = self.push([Token::literal("DEFAULT VALUES")]);
        stmt.default_values = true;
        stmt
    }

    /// `ON CONFLICT` without a target.
    pub fn on_conflict(&self) -> Self {
        self.push([Token::literal("ON CONFLICT")])
    }

    /// `ON CONFLICT (<col>, ...)`
    pub fn on_conflict_columns(&self, columns: &[&str]) -> Self {
        let names = columns
            .iter()
            .map(|name| Token::literal(quote(self.table.resolve(name).sql_name())))
            .collect();
        self.push([
            Token::literal("ON CONFLICT"),
            Token::group(vec![Token::comma_list(names)]),
        ])
    }

    pub fn do_nothing(&self) -> Self {
        self.push([Token::literal("DO NOTHING")])
    }

    /// `DO UPDATE SET col = $n, ...` in table declaration order.
    pub fn do_update_set(&self, patch: Record) -> Self {
        self.push([
            Token::literal("DO UPDATE SET"),
            assignments(&self.table, &patch),
        ])
    }

    /// `RETURNING <col>, ...`; the statement now resolves to rows keyed by
    /// the columns' declared names.
    pub fn returning(&self, columns: &[&str]) -> InsertStatement<Rows> {
        let (tokens, keys) = returning_list(&self.table, columns);
        self.with_core(self.core.append(tokens).with_returning_keys(keys))
    }

    /// `INSERT INTO ... SELECT <items>`; follow with `.from(...)`.
    ///
    /// Resolves to rows keyed by the select items, like [`Database::select`].
    /// Without a `RETURNING` the server sends no rows; use
    /// [`SelectStatement::affected_rows`] to get the inserted count instead.
    pub fn select(&self, items: &[&dyn Selectable]) -> SelectStatement<Rows> {
        let (tokens, keys) = select_list(items);
        SelectStatement::from_core(self.core.append(tokens).with_returning_keys(keys))
    }

    /// `INSERT INTO ... UPDATE <table>`; follow with `.set(...)`.
    pub fn update(&self, table: &Table) -> UpdateStatement<AffectedRows> {
        UpdateStatement::new(self.core.clone(), table)
    }

    /// `INSERT INTO ... DELETE FROM <table>`
    pub fn delete_from(&self, table: &Table) -> DeleteStatement<AffectedRows> {
        DeleteStatement::new(self.core.clone(), table)
    }
}
