//! JSON array parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexSet;
use serde_json::Value;

use crate::model::{AnyValue, Table};

use super::{build_table, Parser};

/// Parser for JSON array files
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        let reader = BufReader::new(file);

        let value: Value =
            serde_json::from_reader(reader).context("Failed to parse JSON file")?;

        // Handle both arrays and single objects
        let array = match value {
            Value::Array(arr) => arr,
            Value::Object(_) => vec![value],
            _ => bail!("JSON must be an array or object"),
        };

        // Collect all unique keys across all objects to build column list
        let mut column_names: IndexSet<String> = IndexSet::new();
        for item in &array {
            match item {
                Value::Object(obj) => {
                    for key in obj.keys() {
                        column_names.insert(key.clone());
                    }
                }
                _ => bail!("JSON array items must be objects"),
            }
        }

        let data: Vec<Vec<AnyValue>> = column_names
            .iter()
            .map(|key| {
                array
                    .iter()
                    .map(|item| json_value_to_cell(item.get(key)))
                    .collect()
            })
            .collect();

        build_table(column_names.into_iter().collect(), data)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "json")
    }
}

fn json_value_to_cell(value: Option<&Value>) -> AnyValue {
    match value {
        None | Some(Value::Null) => AnyValue::Null,
        Some(Value::Bool(b)) => AnyValue::Boolean(*b),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                AnyValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                AnyValue::UInt(u)
            } else if let Some(f) = n.as_f64() {
                AnyValue::Float(f)
            } else {
                AnyValue::from(n.to_string())
            }
        }
        Some(Value::String(s)) => {
            // Try parsing as date/datetime
            if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return AnyValue::Date(date);
            }
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return AnyValue::Datetime(dt);
            }
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return AnyValue::Datetime(dt);
            }
            AnyValue::from(s.as_str())
        }
        Some(Value::Array(arr)) => {
            AnyValue::List(arr.iter().map(|v| json_value_to_cell(Some(v))).collect())
        }
        Some(Value::Object(obj)) => {
            // Serialize object back to JSON string
            AnyValue::from(serde_json::to_string(obj).unwrap_or_default())
        }
    }
}
