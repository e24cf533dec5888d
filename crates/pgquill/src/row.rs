//! Result rows and row decoding

use crate::error::{QuillError, QuillResult};
use crate::value::Value;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use tokio_postgres::types::{FromSql, Type};
use uuid::Uuid;

/// A result row: column names mapped to values, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for executors and tests.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Insert or replace a column value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(k, _)| *k == column) {
            Some(entry) => entry.1 = value,
            None => self.columns.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v)
    }

    /// Decode a single column into `T`.
    pub fn try_get<T: DeserializeOwned>(&self, column: &str) -> QuillResult<T> {
        let value = self
            .get(column)
            .ok_or_else(|| QuillError::decode(column, "no such column"))?;
        serde_json::from_value(value.to_json())
            .map_err(|e| QuillError::decode(column, e.to_string()))
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Keep exactly `keys`, in that order. Missing keys become `NULL`.
    pub fn project(&self, keys: &[String]) -> Row {
        Row {
            columns: keys
                .iter()
                .map(|k| (k.clone(), self.get(k).cloned().unwrap_or_default()))
                .collect(),
        }
    }

    /// Convert to a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.columns
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Deserialize this row into `T` via serde.
    pub fn decode<T: DeserializeOwned>(&self) -> QuillResult<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }

    /// Decode a `tokio-postgres` row by inspecting each column's type.
    pub fn from_pg(row: &tokio_postgres::Row) -> QuillResult<Row> {
        let mut out = Row::new();
        for (idx, column) in row.columns().iter().enumerate() {
            let value = decode_column(row, idx, column.name(), column.type_())?;
            out.columns.push((column.name().to_string(), value));
        }
        Ok(out)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

fn get<'a, T: FromSql<'a>>(
    row: &'a tokio_postgres::Row,
    idx: usize,
    name: &str,
) -> QuillResult<Option<T>> {
    row.try_get::<_, Option<T>>(idx)
        .map_err(|e| QuillError::decode(name, e.to_string()))
}

fn decode_column(
    row: &tokio_postgres::Row,
    idx: usize,
    name: &str,
    ty: &Type,
) -> QuillResult<Value> {
    let value: Value = if *ty == Type::BOOL {
        get::<bool>(row, idx, name)?.into()
    } else if *ty == Type::INT2 {
        get::<i16>(row, idx, name)?.into()
    } else if *ty == Type::INT4 {
        get::<i32>(row, idx, name)?.into()
    } else if *ty == Type::INT8 {
        get::<i64>(row, idx, name)?.into()
    } else if *ty == Type::OID {
        get::<u32>(row, idx, name)?.into()
    } else if *ty == Type::FLOAT4 {
        get::<f32>(row, idx, name)?.into()
    } else if *ty == Type::FLOAT8 {
        get::<f64>(row, idx, name)?.into()
    } else if *ty == Type::BYTEA {
        get::<Vec<u8>>(row, idx, name)?.into()
    } else if *ty == Type::UUID {
        get::<Uuid>(row, idx, name)?.into()
    } else if *ty == Type::TIMESTAMPTZ {
        get::<DateTime<Utc>>(row, idx, name)?.into()
    } else if *ty == Type::TIMESTAMP {
        get::<NaiveDateTime>(row, idx, name)?.into()
    } else if *ty == Type::JSON || *ty == Type::JSONB {
        get::<serde_json::Value>(row, idx, name)?.into()
    } else {
        // text, varchar, bpchar, name, citext and friends
        get::<String>(row, idx, name)
            .map_err(|_| QuillError::decode(name, format!("unsupported column type {ty}")))?
            .into()
    };
    Ok(value)
}
