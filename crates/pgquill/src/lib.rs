//! # pgquill
//!
//! An immutable, parameterized statement builder for PostgreSQL.
//!
//! ## Features
//!
//! - **Parameters, never concatenation**: values are bound as `$1..$n`; only
//!   identifiers and keywords reach the SQL text
//! - **Immutable builders**: every clause method returns a new statement, so
//!   statements can be shared, branched and reused as templates
//! - **Awaitable statements**: `.await` serializes, runs the statement on the
//!   database's executor and shapes the result
//! - **Bring your own executor**: `tokio_postgres::Client`, a
//!   `deadpool_postgres::Pool`, or any async closure
//!
//! ## Example
//!
//! ```ignore
//! use pgquill::{ColumnDef, Database, ExpressionExt, Table, record};
//!
//! let foo = Table::define("foo")
//!     .column(ColumnDef::uuid("id").primary_key().default("gen_random_uuid()"))
//!     .column(ColumnDef::timestamp_tz("createDate").not_null().default("now()"))
//!     .column(ColumnDef::text("name").not_null())
//!     .column(ColumnDef::integer("value"));
//!
//! let db = Database::new(client);
//!
//! // INSERT INTO foo (name) VALUES ($1) ON CONFLICT (id) DO UPDATE SET name = $2
//! let affected = db
//!     .insert_into(&foo)
//!     .values(record! { "name" => "Test" })
//!     .on_conflict_columns(&["id"])
//!     .do_update_set(record! { "name" => "Test 2" })
//!     .await?;
//!
//! // SELECT foo.id, foo.create_date "createDate", foo.name, foo.value FROM foo WHERE foo.value < $1
//! let rows = db
//!     .select_from(&foo)
//!     .r#where(&foo.col("value").lt(123))
//!     .await?;
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod executor;
pub mod expr;
pub mod ident;
pub mod log;
pub mod record;
pub mod row;
pub mod stmt;
pub mod table;
pub mod token;
pub mod value;

pub use config::{DatabaseConfig, LogLevel};
pub use db::Database;
pub use error::{QuillError, QuillResult};
pub use executor::{Executor, FnExecutor, QueryResult, from_fn};
pub use expr::{Aliased, Expr, Expression, ExpressionExt, Selectable, count_all, raw};
pub use log::StatementKind;
pub use record::{IntoRecords, Record};
pub use row::Row;
pub use stmt::{
    Affected, AffectedRows, DeleteStatement, InsertStatement, Limit, ResultShape, Rows,
    SelectStatement, UpdateStatement,
};
pub use table::{Column, ColumnDef, Table};
pub use token::{SerializedQuery, Token, TokenList, serialize};
pub use value::Value;
