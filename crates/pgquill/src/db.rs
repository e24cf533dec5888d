//! Entry point: a [`Database`] owns the executor and starts every statement.

use crate::config::DatabaseConfig;
use crate::executor::Executor;
use crate::expr::Selectable;
use crate::log::StatementKind;
use crate::stmt::{
    DeleteStatement, InsertStatement, Rows, SelectStatement, StatementCore, UpdateStatement,
    select_list,
};
use crate::table::Table;
use crate::token::Token;
use std::fmt;
use std::sync::Arc;

/// Handle shared by every statement built from it.
///
/// Cloning is cheap; the executor and configuration are reference counted.
///
/// # Example
///
/// ```ignore
/// use pgquill::{Database, record};
///
/// let db = Database::new(client);
/// let inserted = db
///     .insert_into(&foo)
///     .values(record! { "name" => "Test" })
///     .returning(&["id"])
///     .await?;
/// ```
#[derive(Clone)]
pub struct Database {
    pub(crate) executor: Arc<dyn Executor>,
    pub(crate) config: Arc<DatabaseConfig>,
}

impl Database {
    /// Create a database handle with default configuration.
    pub fn new(executor: impl Executor + 'static) -> Self {
        Self::with_config(executor, DatabaseConfig::default())
    }

    pub fn with_config(executor: impl Executor + 'static, config: DatabaseConfig) -> Self {
        Self {
            executor: Arc::new(executor),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// `SELECT <items>`; follow with `.from(...)`.
    ///
    /// Each row comes back keyed by the items' declared names.
    pub fn select(&self, items: &[&dyn Selectable]) -> SelectStatement<Rows> {
        let (tokens, keys) = select_list(items);
        SelectStatement::from_core(StatementCore::new(
            self.clone(),
            StatementKind::Select,
            tokens,
            keys,
        ))
    }

    /// `SELECT <every declared column> FROM <table>`.
    ///
    /// A table without declared columns selects `*` and rows come back as
    /// returned by the executor.
    pub fn select_from(&self, table: &Table) -> SelectStatement<Rows> {
        let columns = table.all_columns();
        let core = if columns.is_empty() {
            StatementCore::new(
                self.clone(),
                StatementKind::Select,
                vec![Token::literal("SELECT"), Token::literal("*")],
                Vec::new(),
            )
        } else {
            let items: Vec<&dyn Selectable> =
                columns.iter().map(|c| c as &dyn Selectable).collect();
            let (tokens, keys) = select_list(&items);
            StatementCore::new(self.clone(), StatementKind::Select, tokens, keys)
        };
        SelectStatement::from_core(core).from(table)
    }

    /// `INSERT INTO <table>`; columns are derived from the records passed to
    /// `values`.
    pub fn insert_into(&self, table: &Table) -> InsertStatement {
        InsertStatement::new(self.clone(), table, None)
    }

    /// `INSERT INTO <table> (<columns>)`, the entry point for the
    /// insert-from-select/update/delete forms.
    pub fn insert_into_columns(&self, table: &Table, columns: &[&str]) -> InsertStatement {
        InsertStatement::new(self.clone(), table, Some(columns))
    }

    /// `UPDATE <table>`; follow with `.set(...)`.
    pub fn update(&self, table: &Table) -> UpdateStatement {
        let core = StatementCore::new(self.clone(), StatementKind::Update, Vec::new(), Vec::new());
        UpdateStatement::new(core, table)
    }

    /// `DELETE FROM <table>`
    pub fn delete_from(&self, table: &Table) -> DeleteStatement {
        let core = StatementCore::new(self.clone(), StatementKind::Delete, Vec::new(), Vec::new());
        DeleteStatement::new(core, table)
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

