//! JSON output format

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::config::DisplayConfig;
use crate::model::{AnyValue, Table};

use super::OutputFormatter;

/// JSON output formatter; emits every row regardless of the row limit
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonColumn {
    name: String,
    dtype: String,
}

#[derive(Serialize)]
struct JsonTableOutput {
    shape: (usize, usize),
    columns: Vec<JsonColumn>,
    rows: Vec<Vec<serde_json::Value>>,
}

fn cell_value_to_json(value: &AnyValue) -> serde_json::Value {
    match value {
        AnyValue::Null => serde_json::Value::Null,
        AnyValue::Boolean(b) => serde_json::Value::Bool(*b),
        AnyValue::Int(i) => serde_json::json!(*i),
        AnyValue::UInt(u) => serde_json::json!(*u),
        AnyValue::Float(f) => serde_json::json!(*f),
        AnyValue::String(s) => serde_json::Value::String(s.to_string()),
        AnyValue::Date(d) => serde_json::Value::String(d.to_string()),
        AnyValue::Time(t) => serde_json::Value::String(t.to_string()),
        AnyValue::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        AnyValue::Duration(v, _) => serde_json::json!(*v),
        AnyValue::Decimal(mantissa, scale) => {
            let scale = u32::try_from(*scale).unwrap_or(u32::MAX);
            match 10i128.checked_pow(scale) {
                Some(div) => {
                    let sign = if *mantissa < 0 { "-" } else { "" };
                    let abs = mantissa.unsigned_abs();
                    let div = div.unsigned_abs();
                    if scale == 0 {
                        serde_json::Value::String(format!("{}{}", sign, abs))
                    } else {
                        serde_json::Value::String(format!(
                            "{}{}.{:0width$}",
                            sign,
                            abs / div,
                            abs % div,
                            width = scale as usize
                        ))
                    }
                }
                None => serde_json::Value::String(mantissa.to_string()),
            }
        }
        AnyValue::List(items) | AnyValue::Struct(items) => {
            serde_json::Value::Array(items.iter().map(cell_value_to_json).collect())
        }
    }
}

impl OutputFormatter for JsonOutput {
    fn render(&self, table: &Table, _config: &DisplayConfig, writer: &mut dyn Write) -> Result<()> {
        let columns = table
            .columns()
            .iter()
            .map(|c| JsonColumn {
                name: c.name.clone(),
                dtype: c.dtype.to_string(),
            })
            .collect();
        let rows = (0..table.height())
            .map(|r| {
                table
                    .columns()
                    .iter()
                    .map(|c| cell_value_to_json(&c.values[r]))
                    .collect()
            })
            .collect();

        let output = JsonTableOutput {
            shape: table.shape(),
            columns,
            rows,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
