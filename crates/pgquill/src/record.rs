//! Column → value records used by `values`, `set` and `do_update_set`.

use crate::value::Value;

/// An ordered set of `(column name, value)` pairs.
///
/// Keys are the declared column names (e.g. `createDate`); the statement
/// builders map them to SQL names and emit them in the table's declaration
/// order, not in record order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, replacing any previous value for the same key.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Record::new(), |record, (k, v)| record.set(k, v))
    }
}

/// One or many records passed to `values`.
///
/// A single [`Record`] inserts one row; a `Vec`/array/slice inserts one row
/// per element in order.
pub trait IntoRecords {
    fn into_records(self) -> Vec<Record>;
}

impl IntoRecords for Record {
    fn into_records(self) -> Vec<Record> {
        vec![self]
    }
}

impl IntoRecords for Vec<Record> {
    fn into_records(self) -> Vec<Record> {
        self
    }
}

impl<const N: usize> IntoRecords for [Record; N] {
    fn into_records(self) -> Vec<Record> {
        self.into()
    }
}

impl IntoRecords for &[Record] {
    fn into_records(self) -> Vec<Record> {
        self.to_vec()
    }
}

/// Build a [`Record`] from `key => value` pairs.
///
/// ```ignore
/// let row = pgquill::record! { "name" => "Test", "value" => 1 };
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Record::new()$(.set($key, $value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_existing_key() {
        let r = Record::new().set("name", "a").set("name", "b");
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("name"), Some(&Value::Text("b".into())));
    }

    #[test]
    fn macro_builds_in_order() {
        let r = crate::record! { "b" => 1, "a" => "x" };
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(crate::record! {}.is_empty());
    }

    #[test]
    fn collects_from_pairs() {
        let r: Record = [("id", 1), ("value", 2)].into_iter().collect();
        assert_eq!(r.get("value"), Some(&Value::Int(2)));
    }
}
