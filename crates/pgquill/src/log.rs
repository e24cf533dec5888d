//! SQL and build-time log events.
//!
//! With the `tracing` feature (on by default) events go through `tracing`:
//! - target `pgquill.sql`: one event per execution, before the executor runs
//! - target `pgquill.build`: builder warnings such as unknown record keys
//!
//! Without the feature every function here is a no-op.

use crate::config::DatabaseConfig;
use std::fmt;

/// The kind of statement being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::Select => "select",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
        })
    }
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql(sql: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

/// Emit the SQL about to be executed.
#[cfg(feature = "tracing")]
pub(crate) fn emit_sql(
    config: &DatabaseConfig,
    kind: StatementKind,
    sql: &str,
    param_count: usize,
) {
    use tracing::Level;

    /// Dispatch a tracing event at a runtime-determined level.
    macro_rules! emit_at_level {
        ($level:expr, $($field:tt)*) => {
            match $level {
                Level::ERROR => tracing::error!($($field)*),
                Level::WARN  => tracing::warn!($($field)*),
                Level::INFO  => tracing::info!($($field)*),
                Level::DEBUG => tracing::debug!($($field)*),
                Level::TRACE => tracing::trace!($($field)*),
            }
        };
    }

    if !config.log_sql {
        return;
    }
    let sql = truncate_sql(sql, config.max_sql_length);
    let level: Level = config.log_level.into();
    emit_at_level!(
        level,
        target: "pgquill.sql",
        statement = %kind,
        param_count,
        sql = %sql,
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn emit_sql(
    _config: &DatabaseConfig,
    _kind: StatementKind,
    _sql: &str,
    _param_count: usize,
) {
}

/// A record key that matches no column of the target table.
#[cfg(feature = "tracing")]
pub(crate) fn unknown_column(table: &str, key: &str) {
    tracing::warn!(target: "pgquill.build", table, column = key, "ignoring unknown column");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn unknown_column(_table: &str, _key: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
        assert_eq!(truncate_sql_bytes("SELECT 1", 6), "SELECT");
        // 'é' is two bytes; cutting inside it backs off to the boundary.
        assert_eq!(truncate_sql_bytes("é", 1), "");
    }

    #[test]
    fn truncate_sql_marks_cut_text() {
        assert_eq!(truncate_sql("SELECT 1", Some(6)), "SELECT...");
        assert_eq!(truncate_sql("SELECT 1", None), "SELECT 1");
    }

    #[test]
    fn statement_kind_display() {
        assert_eq!(StatementKind::Insert.to_string(), "insert");
    }
}
