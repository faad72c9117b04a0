//! Parser layer for loading CSV and JSON files into tables

mod csv;
mod json;

use std::borrow::Cow;
use std::path::Path;

use anyhow::{bail, Result};

use crate::model::{AnyValue, Column, DataType, Table, TimeUnit};

pub use self::csv::CsvParser;
pub use self::json::JsonParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser), Box::new(JsonParser)],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => detect_format(path).unwrap_or("").to_string(),
        };

        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }

        bail!(
            "Unsupported file format: {}",
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
        )
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<Table> {
        let parser = self.get_parser(path)?;
        let table = parser.parse(path)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.height(),
            columns = table.width(),
            "Loaded table"
        );
        Ok(table)
    }
}

/// Detect file format from content (for files without extension)
pub fn detect_format(path: &Path) -> Option<&'static str> {
    use std::fs::File;
    use std::io::{BufRead, BufReader};

    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let trimmed = line.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Some("json");
    }

    // Default to CSV
    Some("csv")
}

/// Type of a single parsed value
fn value_dtype(value: &AnyValue) -> DataType {
    match value {
        AnyValue::Null => DataType::Null,
        AnyValue::Boolean(_) => DataType::Boolean,
        AnyValue::Int(_) => DataType::Int64,
        AnyValue::UInt(_) => DataType::UInt64,
        AnyValue::Float(_) => DataType::Float64,
        AnyValue::Date(_) => DataType::Date,
        AnyValue::Time(_) => DataType::Time,
        AnyValue::Datetime(_) => DataType::Datetime(TimeUnit::Microseconds, None),
        AnyValue::Duration(_, unit) => DataType::Duration(*unit),
        AnyValue::Decimal(_, scale) => DataType::Decimal(None, *scale),
        AnyValue::List(items) => DataType::List(Box::new(
            items
                .iter()
                .map(value_dtype)
                .fold(DataType::Null, DataType::widen),
        )),
        AnyValue::String(_) | AnyValue::Struct(_) => DataType::String,
    }
}

/// Convert a value so it matches the column type inferred for it
fn coerce(value: AnyValue, dtype: &DataType) -> AnyValue {
    match (value, dtype) {
        (AnyValue::Null, _) => AnyValue::Null,
        (AnyValue::Int(i), DataType::Float64) => AnyValue::Float(i as f64),
        (AnyValue::UInt(u), DataType::Float64) => AnyValue::Float(u as f64),
        (AnyValue::List(items), DataType::List(inner)) => {
            AnyValue::List(items.into_iter().map(|v| coerce(v, inner)).collect())
        }
        (AnyValue::Date(d), DataType::Datetime(..)) => d.and_time(chrono::NaiveTime::MIN).into(),
        (v @ AnyValue::String(_), DataType::String) => v,
        (v, DataType::String) => AnyValue::String(Cow::Owned(raw_text(&v))),
        (v, _) => v,
    }
}

/// Text of a value demoted to a string column
fn raw_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Boolean(b) => b.to_string(),
        AnyValue::Int(i) => i.to_string(),
        AnyValue::UInt(u) => u.to_string(),
        AnyValue::Float(f) => f.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Date(d) => d.to_string(),
        AnyValue::Time(t) => t.to_string(),
        AnyValue::Datetime(dt) => dt.to_string(),
        AnyValue::Duration(v, unit) => format!("{}{}", v, unit),
        AnyValue::Decimal(m, _) => m.to_string(),
        AnyValue::List(items) | AnyValue::Struct(items) => {
            let parts: Vec<String> = items.iter().map(raw_text).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}

/// Build a table from parsed columns, inferring each column's type
fn build_table(names: Vec<String>, data: Vec<Vec<AnyValue>>) -> Result<Table> {
    let columns = names
        .into_iter()
        .zip(data)
        .map(|(name, values)| {
            let dtype = values
                .iter()
                .map(value_dtype)
                .fold(DataType::Null, DataType::widen);
            let values: Vec<AnyValue> = values.into_iter().map(|v| coerce(v, &dtype)).collect();
            Column::new(name, dtype, values)
        })
        .collect();

    Ok(Table::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_table_widens() {
        let table = build_table(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                vec![AnyValue::Int(1), AnyValue::Float(2.5)],
                vec![AnyValue::Int(1), "x".into()],
                vec![AnyValue::Null, AnyValue::Boolean(true)],
            ],
        )
        .unwrap();

        let a = table.column("a").unwrap();
        assert_eq!(a.dtype, DataType::Float64);
        assert_eq!(a.values[0], AnyValue::Float(1.0));

        let b = table.column("b").unwrap();
        assert_eq!(b.dtype, DataType::String);
        assert_eq!(b.values[0], AnyValue::from("1"));

        assert_eq!(table.column("c").unwrap().dtype, DataType::Boolean);
    }

    #[test]
    fn test_build_table_mixed_integers_and_lists() {
        let table = build_table(
            vec!["big".into(), "nums".into()],
            vec![
                vec![AnyValue::Int(-1), AnyValue::UInt(u64::MAX)],
                vec![
                    AnyValue::List(vec![AnyValue::Int(1), AnyValue::Float(2.5)]),
                    AnyValue::List(vec![AnyValue::Int(3)]),
                ],
            ],
        )
        .unwrap();

        let big = table.column("big").unwrap();
        assert_eq!(big.dtype, DataType::Float64);
        assert_eq!(big.values[0], AnyValue::Float(-1.0));
        assert_eq!(big.values[1], AnyValue::Float(u64::MAX as f64));

        let nums = table.column("nums").unwrap();
        assert_eq!(nums.dtype, DataType::List(Box::new(DataType::Float64)));
        assert_eq!(
            nums.values[0],
            AnyValue::List(vec![AnyValue::Float(1.0), AnyValue::Float(2.5)])
        );
        assert_eq!(nums.values[1], AnyValue::List(vec![AnyValue::Float(3.0)]));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = build_table(
            vec!["a".into(), "a".into()],
            vec![vec![AnyValue::Int(1)], vec![AnyValue::Int(2)]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate column name: a"));
    }

    #[test]
    fn test_unsupported_extension() {
        let factory = ParserFactory::new();
        assert!(factory.get_parser(Path::new("data.xlsx")).is_err());
        assert!(factory.get_parser(Path::new("data.CSV")).is_ok());
    }
}
