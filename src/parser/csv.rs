//! CSV file parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::AnyValue;

use super::{build_table, Parser};

/// Parser for CSV files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> Result<crate::model::Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        // Read headers
        let names: Vec<String> = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .iter()
            .map(str::to_string)
            .collect();

        let mut data: Vec<Vec<AnyValue>> = vec![Vec::new(); names.len()];

        for (line_num, result) in csv_reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to read CSV row {}", line_num + 2))?; // +2 for 1-indexing and header

            // Short rows are padded with nulls, extra fields dropped
            for (i, column) in data.iter_mut().enumerate() {
                column.push(record.get(i).map_or(AnyValue::Null, parse_cell_value));
            }
        }

        build_table(names, data)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

/// Parse a string value into an AnyValue with type inference
fn parse_cell_value(s: &str) -> AnyValue {
    let trimmed = s.trim();

    // Check for empty/null
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
        return AnyValue::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return AnyValue::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return AnyValue::Boolean(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return AnyValue::Int(i);
    }

    if let Ok(f) = trimmed.parse::<f64>() {
        return AnyValue::Float(f);
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return AnyValue::Date(date);
    }

    // Try parsing as datetime (ISO 8601)
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return AnyValue::Datetime(dt);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return AnyValue::Datetime(dt);
    }

    // Default to string
    AnyValue::from(trimmed)
}
