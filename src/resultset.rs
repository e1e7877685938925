//! Tabular result sets
//!
//! Engines hand out result sets behind the [`ResultSet`] trait; callers
//! that need the data after the producing context is gone take a
//! [`MemoryResultSet`] via [`ResultSet::memory_copy`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Read access to tabular data
pub trait ResultSet: fmt::Debug + Send + Sync {
    /// Column names in order
    fn column_names(&self) -> Vec<String>;

    /// Number of rows
    fn row_count(&self) -> usize;

    /// Cell at (`row`, `column`), `None` when out of range
    fn value_at(&self, row: usize, column: usize) -> Option<Value>;

    /// Copy all rows into an independent in-memory result set
    fn memory_copy(&self) -> MemoryResultSet {
        let columns = self.column_names();
        let rows = (0..self.row_count())
            .map(|row| {
                (0..columns.len())
                    .map(|column| self.value_at(row, column).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        MemoryResultSet { columns, rows }
    }

    /// Index of the column named `name`
    fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names().iter().position(|column| column == name)
    }
}

/// Result set held entirely in memory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl MemoryResultSet {
    /// Create an empty result set with the given columns
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the column count
    pub fn add_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// Builder form of [`add_row`](Self::add_row)
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.add_row(row);
        self
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Values of one column, top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}

impl ResultSet for MemoryResultSet {
    fn column_names(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn value_at(&self, row: usize, column: usize) -> Option<Value> {
        self.rows.get(row).and_then(|r| r.get(column)).cloned()
    }

    fn memory_copy(&self) -> MemoryResultSet {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Squares(usize);

    impl ResultSet for Squares {
        fn column_names(&self) -> Vec<String> {
            vec!["n".into(), "square".into()]
        }

        fn row_count(&self) -> usize {
            self.0
        }

        fn value_at(&self, row: usize, column: usize) -> Option<Value> {
            match column {
                0 if row < self.0 => Some(json!(row)),
                1 if row < self.0 => Some(json!(row * row)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_default_memory_copy_materializes_rows() {
        let copy = Squares(3).memory_copy();

        assert_eq!(copy.column_names(), vec!["n", "square"]);
        assert_eq!(copy.row_count(), 3);
        assert_eq!(copy.value_at(2, 1), Some(json!(4)));
        assert_eq!(copy.column_index("square"), Some(1));
    }

    #[test]
    fn test_add_row_pads_to_width() {
        let set = MemoryResultSet::new(["code", "label", "rank"]).with_row(vec![json!("EU")]);

        assert_eq!(set.rows()[0], vec![json!("EU"), Value::Null, Value::Null]);
        assert_eq!(set.column(0).collect::<Vec<_>>(), vec![&json!("EU")]);
    }
}
