//! Table, Column, and value data structures

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::schema::{DataType, TimeUnit};

/// Errors raised while assembling a table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("column '{name}' has {found} values, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

/// A single value with type information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnyValue {
    Null,
    Boolean(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(Cow<'static, str>),
    Date(NaiveDate),
    Time(NaiveTime),
    Datetime(NaiveDateTime),
    Duration(i64, TimeUnit),
    /// Fixed-point mantissa and scale
    Decimal(i128, usize),
    List(Vec<AnyValue>),
    Struct(Vec<AnyValue>),
}

impl AnyValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, AnyValue::Null)
    }
}

impl From<&str> for AnyValue {
    fn from(s: &str) -> Self {
        AnyValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for AnyValue {
    fn from(s: String) -> Self {
        AnyValue::String(Cow::Owned(s))
    }
}

impl From<i64> for AnyValue {
    fn from(i: i64) -> Self {
        AnyValue::Int(i)
    }
}

impl From<i32> for AnyValue {
    fn from(i: i32) -> Self {
        AnyValue::Int(i as i64)
    }
}

impl From<u64> for AnyValue {
    fn from(u: u64) -> Self {
        AnyValue::UInt(u)
    }
}

impl From<f64> for AnyValue {
    fn from(f: f64) -> Self {
        AnyValue::Float(f)
    }
}

impl From<f32> for AnyValue {
    fn from(f: f32) -> Self {
        AnyValue::Float(f as f64)
    }
}

impl From<bool> for AnyValue {
    fn from(b: bool) -> Self {
        AnyValue::Boolean(b)
    }
}

impl From<NaiveDate> for AnyValue {
    fn from(d: NaiveDate) -> Self {
        AnyValue::Date(d)
    }
}

impl From<NaiveDateTime> for AnyValue {
    fn from(dt: NaiveDateTime) -> Self {
        AnyValue::Datetime(dt)
    }
}

impl From<NaiveTime> for AnyValue {
    fn from(t: NaiveTime) -> Self {
        AnyValue::Time(t)
    }
}

impl<T> From<Vec<T>> for AnyValue
where
    T: Into<AnyValue>,
{
    fn from(items: Vec<T>) -> Self {
        AnyValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for AnyValue
where
    T: Into<AnyValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => AnyValue::Null,
        }
    }
}

/// A named column of values sharing one declared type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub dtype: DataType,
    pub values: Vec<AnyValue>,
}

impl Column {
    pub fn new<I, V>(name: impl Into<String>, dtype: DataType, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AnyValue>,
    {
        Self {
            name: name.into(),
            dtype,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn slice(&self, offset: usize, len: usize) -> Column {
        Column {
            name: self.name.clone(),
            dtype: self.dtype.clone(),
            values: self.values.iter().skip(offset).take(len).cloned().collect(),
        }
    }
}

/// An ordered set of equally long, uniquely named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    index: IndexMap<String, usize>,
    height: usize,
}

impl Table {
    /// Assemble a table, validating names and lengths
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let height = columns.first().map(Column::len).unwrap_or(0);
        let mut index = IndexMap::with_capacity(columns.len());

        for (i, column) in columns.iter().enumerate() {
            if column.len() != height {
                return Err(TableError::LengthMismatch {
                    name: column.name.clone(),
                    expected: height,
                    found: column.len(),
                });
            }
            if index.insert(column.name.clone(), i).is_some() {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
        }

        Ok(Self {
            columns,
            index,
            height,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.columns.len())
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Table {
        self.slice(0, n)
    }

    /// Last `n` rows
    pub fn tail(&self, n: usize) -> Table {
        let n = n.min(self.height);
        self.slice(self.height - n, n)
    }

    fn slice(&self, offset: usize, len: usize) -> Table {
        let offset = offset.min(self.height);
        let len = len.min(self.height - offset);
        Table {
            columns: self.columns.iter().map(|c| c.slice(offset, len)).collect(),
            index: self.index.clone(),
            height: len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Column::new("foo", DataType::Int64, [1i64, 2, 3, 4, 5, 6, 7]),
            Column::new("bar", DataType::String, ["a", "b", "c", "d", "e", "f", "g"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape_and_lookup() {
        let table = sample();
        assert_eq!(table.shape(), (7, 2));
        assert_eq!(table.column("bar").unwrap().dtype, DataType::String);
        assert!(table.column("baz").is_none());
    }

    #[test]
    fn test_head_tail() {
        let table = sample();
        let head = table.head(3);
        assert_eq!(head.shape(), (3, 2));
        assert_eq!(head.columns()[0].values[2], AnyValue::Int(3));

        let tail = table.tail(2);
        assert_eq!(tail.columns()[1].values, vec![AnyValue::from("f"), AnyValue::from("g")]);

        assert_eq!(table.head(100).height(), 7);
        assert_eq!(table.tail(100).height(), 7);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::new("a", DataType::Int64, [1i64]),
            Column::new("a", DataType::Int64, [2i64]),
        ])
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("a".into()));
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::new("a", DataType::Int64, [1i64, 2]),
            Column::new("b", DataType::Int64, [2i64]),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { found: 1, .. }));
    }

    #[test]
    fn test_option_values_become_null() {
        let column = Column::new("x", DataType::Int64, [Some(1i64), None]);
        assert!(column.values[1].is_null());
    }
}
