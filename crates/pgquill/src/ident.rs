//! SQL identifier rendering.
//!
//! Identifiers are never bound as parameters (Postgres doesn't allow it), so
//! they are written into the SQL text directly:
//!
//! - Plain names matching `[a-z_][a-z0-9_$]*` that are not reserved words are
//!   emitted as-is.
//! - Everything else is double-quoted, with `"` escaped as `""`.
//!
//! Declared column names are mapped to their SQL name with snake_case, so a
//! column declared as `createDate` lives in the database as `create_date`.

use heck::ToSnakeCase;
use std::borrow::Cow;

/// PostgreSQL reserved key words (sorted, for binary search).
const RESERVED: &[&str] = &[
    "all",
    "analyse",
    "analyze",
    "and",
    "any",
    "array",
    "as",
    "asc",
    "asymmetric",
    "both",
    "case",
    "cast",
    "check",
    "collate",
    "column",
    "constraint",
    "create",
    "current_catalog",
    "current_date",
    "current_role",
    "current_time",
    "current_timestamp",
    "current_user",
    "default",
    "deferrable",
    "desc",
    "distinct",
    "do",
    "else",
    "end",
    "except",
    "false",
    "fetch",
    "for",
    "foreign",
    "from",
    "grant",
    "group",
    "having",
    "in",
    "initially",
    "intersect",
    "into",
    "lateral",
    "leading",
    "limit",
    "localtime",
    "localtimestamp",
    "not",
    "null",
    "offset",
    "on",
    "only",
    "or",
    "order",
    "placing",
    "primary",
    "references",
    "returning",
    "select",
    "session_user",
    "some",
    "symmetric",
    "table",
    "then",
    "to",
    "trailing",
    "true",
    "union",
    "unique",
    "user",
    "using",
    "variadic",
    "when",
    "where",
    "window",
    "with",
];

fn is_plain(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_lowercase() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$') {
        return false;
    }
    RESERVED.binary_search(&name).is_err()
}

/// Render an identifier, quoting it only when Postgres would otherwise fold
/// or reject it.
pub fn quote(name: &str) -> Cow<'_, str> {
    if is_plain(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(always_quote(name))
    }
}

/// Render an identifier in double quotes unconditionally (used for aliases,
/// which must keep their case).
pub fn always_quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Map a declared (possibly camelCase) name to its SQL column name.
pub fn sql_name(name: &str) -> String {
    name.to_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_list_is_sorted() {
        assert!(RESERVED.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn plain_names_are_not_quoted() {
        assert_eq!(quote("foo"), "foo");
        assert_eq!(quote("create_date"), "create_date");
        assert_eq!(quote("_tmp$1"), "_tmp$1");
    }

    #[test]
    fn unsafe_or_reserved_names_are_quoted() {
        assert_eq!(quote("user"), "\"user\"");
        assert_eq!(quote("Order"), "\"Order\"");
        assert_eq!(quote("1abc"), "\"1abc\"");
        assert_eq!(quote("a b"), "\"a b\"");
        assert_eq!(quote("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn sql_name_is_snake_case() {
        assert_eq!(sql_name("createDate"), "create_date");
        assert_eq!(sql_name("id"), "id");
        assert_eq!(sql_name("already_snake"), "already_snake");
    }
}
