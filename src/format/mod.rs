//! Cell formatting: typed values to display strings

mod number;
mod temporal;

use crate::config::{Alignment, DisplayConfig};
use crate::model::{AnyValue, DataType};

pub use temporal::is_valid_format;

use number::{format_decimal, format_float, format_integer};
use temporal::{format_duration, format_temporal};

/// A formatted cell and how it is placed inside its column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: String,
    pub alignment: Alignment,
}

impl RenderedCell {
    pub fn new(text: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            text: text.into(),
            alignment,
        }
    }
}

/// Renders values, headers and placeholders under one configuration
pub struct CellFormatter<'a> {
    config: &'a DisplayConfig,
}

impl<'a> CellFormatter<'a> {
    pub fn new(config: &'a DisplayConfig) -> Self {
        Self { config }
    }

    /// Base alignment of a column's body cells
    pub fn alignment(&self, dtype: &DataType) -> Alignment {
        match self.config.tbl_cell_numeric_alignment {
            Some(numeric) if dtype.is_numeric() => numeric,
            _ => self.config.tbl_cell_alignment,
        }
    }

    /// Format a body cell
    pub fn format(&self, value: &AnyValue, dtype: &DataType) -> RenderedCell {
        RenderedCell::new(self.format_value(value, dtype), self.alignment(dtype))
    }

    /// The `…` placeholder used for omitted rows and columns
    pub fn ellipsis(&self) -> RenderedCell {
        RenderedCell::new(self.config.ellipsis(), self.config.tbl_cell_alignment)
    }

    /// The placeholder of an omitted row, aligned like the rest of its column
    pub fn ellipsis_for(&self, dtype: &DataType) -> RenderedCell {
        RenderedCell::new(self.config.ellipsis(), self.alignment(dtype))
    }

    /// Header cell: name, separator rule and dtype as separate lines, or
    /// `None` when both names and dtypes are hidden
    pub fn header(&self, name: &str, dtype: &DataType) -> Option<RenderedCell> {
        let config = self.config;
        let show_names = !config.tbl_hide_column_names;
        let show_dtypes = !config.tbl_hide_column_data_types;
        let inline = config.dtype_inline();
        let name = self.truncate(name);

        let mut lines = Vec::with_capacity(3);
        if show_names {
            if show_dtypes && inline {
                lines.push(format!("{} ({})", name, dtype));
            } else {
                lines.push(name);
            }
        }
        if show_dtypes && !(inline && show_names) {
            if show_names && !config.tbl_hide_dtype_separator {
                lines.push("---".to_string());
            }
            lines.push(dtype.to_string());
        }

        if lines.is_empty() {
            None
        } else {
            Some(RenderedCell::new(lines.join("\n"), config.tbl_cell_alignment))
        }
    }

    /// Format a value as it appears in a body cell
    pub fn format_value(&self, value: &AnyValue, dtype: &DataType) -> String {
        match value {
            AnyValue::String(s) => self.truncate(s),
            AnyValue::List(items) => self.format_list(items, dtype),
            other => self.format_scalar(other, dtype),
        }
    }

    fn format_scalar(&self, value: &AnyValue, dtype: &DataType) -> String {
        let config = self.config;
        match value {
            AnyValue::Null => config.null_value.clone(),
            AnyValue::Boolean(b) => b.to_string(),
            AnyValue::Int(i) => format_integer(&i.to_string(), config),
            AnyValue::UInt(u) => format_integer(&u.to_string(), config),
            AnyValue::Float(f) => format_float(*f, *dtype == DataType::Float32, config),
            AnyValue::Decimal(mantissa, scale) => format_decimal(*mantissa, *scale, config),
            AnyValue::String(s) => s.to_string(),
            AnyValue::Date(d) => format_temporal(d, &config.date_format),
            AnyValue::Time(t) => format_temporal(t, &config.time_format),
            AnyValue::Datetime(dt) => {
                let s = format_temporal(dt, &config.datetime_format);
                match dtype {
                    DataType::Datetime(_, Some(tz)) => format!("{s} {tz}"),
                    _ => s,
                }
            }
            AnyValue::Duration(v, unit) => format_duration(*v, *unit),
            AnyValue::List(items) => self.format_list(items, dtype),
            AnyValue::Struct(fields) => self.format_struct(fields, dtype),
        }
    }

    /// Values nested in lists and structs; strings are quoted there
    fn format_nested(&self, value: &AnyValue, dtype: &DataType) -> String {
        match value {
            AnyValue::String(s) => format!("\"{}\"", s),
            other => self.format_scalar(other, dtype),
        }
    }

    fn format_list(&self, items: &[AnyValue], dtype: &DataType) -> String {
        let inner = match dtype {
            DataType::List(inner) => inner.as_ref(),
            _ => &DataType::Null,
        };
        let fmt = |v: &AnyValue| self.format_nested(v, inner);

        let parts: Vec<String> = match self.config.fmt_table_cell_list_len {
            Some(max) if max > 0 && items.len() > max => {
                let mut parts: Vec<String> = items[..max - 1].iter().map(fmt).collect();
                if let Some(last) = items.last() {
                    parts.push(format!("{} {}", self.config.ellipsis(), fmt(last)));
                }
                parts
            }
            _ => items.iter().map(fmt).collect(),
        };
        format!("[{}]", parts.join(", "))
    }

    fn format_struct(&self, values: &[AnyValue], dtype: &DataType) -> String {
        let parts: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let field_dtype = match dtype {
                    DataType::Struct(fields) => fields.get(i).map(|f| &f.dtype),
                    _ => None,
                };
                self.format_nested(v, field_dtype.unwrap_or(&DataType::Null))
            })
            .collect();
        format!("{{{}}}", parts.join(","))
    }

    /// Cut text to `fmt_str_lengths` characters plus an ellipsis
    fn truncate(&self, s: &str) -> String {
        let max = self.config.fmt_str_lengths;
        match s.char_indices().nth(max) {
            Some((cut, _)) => format!("{}{}", &s[..cut], self.config.ellipsis()),
            None => s.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, TimeUnit};
    use chrono::NaiveDate;

    fn list_of_ten() -> AnyValue {
        AnyValue::from((0i64..10).collect::<Vec<_>>())
    }

    #[test]
    fn test_string_truncation() {
        let mut config = DisplayConfig::default();
        config.fmt_str_lengths = 10;
        let f = CellFormatter::new(&config);
        let dtype = DataType::String;

        assert_eq!(
            f.format_value(&"Play it, Sam. Play 'As Time Goes By'.".into(), &dtype),
            "Play it, S…"
        );
        assert_eq!(f.format_value(&"short".into(), &dtype), "short");
        assert_eq!(f.format_value(&"exactly 10".into(), &dtype), "exactly 10");
        // characters, not bytes
        assert_eq!(
            f.format_value(&"ñññññññññññññ".into(), &dtype),
            "ññññññññññ…"
        );
    }

    #[test]
    fn test_list_truncation() {
        let mut config = DisplayConfig::default();
        let dtype = DataType::List(Box::new(DataType::Int64));

        config.fmt_table_cell_list_len = Some(2);
        let f = CellFormatter::new(&config);
        assert_eq!(f.format_value(&list_of_ten(), &dtype), "[0, … 9]");

        config.fmt_table_cell_list_len = Some(8);
        let f = CellFormatter::new(&config);
        assert_eq!(
            f.format_value(&list_of_ten(), &dtype),
            "[0, 1, 2, 3, 4, 5, 6, … 9]"
        );

        config.fmt_table_cell_list_len = Some(10);
        let f = CellFormatter::new(&config);
        assert_eq!(
            f.format_value(&list_of_ten(), &dtype),
            "[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]"
        );

        config.fmt_table_cell_list_len = None;
        let f = CellFormatter::new(&config);
        assert!(f.format_value(&list_of_ten(), &dtype).ends_with("8, 9]"));
    }

    #[test]
    fn test_nested_values() {
        let config = DisplayConfig::default();
        let f = CellFormatter::new(&config);

        let strings = DataType::List(Box::new(DataType::String));
        let value = AnyValue::List(vec!["a".into(), AnyValue::Null]);
        assert_eq!(f.format_value(&value, &strings), "[\"a\", null]");

        let dtype = DataType::Struct(vec![
            Field::new("x", DataType::Int64),
            Field::new("y", DataType::String),
        ]);
        let value = AnyValue::Struct(vec![1i64.into(), "b".into()]);
        assert_eq!(f.format_value(&value, &dtype), "{1,\"b\"}");
    }

    #[test]
    fn test_scalars() {
        let mut config = DisplayConfig::default();
        config.null_value = "∅".into();
        let f = CellFormatter::new(&config);

        assert_eq!(f.format_value(&AnyValue::Null, &DataType::Int64), "∅");
        assert_eq!(f.format_value(&true.into(), &DataType::Boolean), "true");
        assert_eq!(f.format_value(&AnyValue::UInt(7), &DataType::UInt8), "7");
        assert_eq!(
            f.format_value(&AnyValue::Decimal(1050, 2), &DataType::Decimal(Some(5), 2)),
            "10.5"
        );
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(f.format_value(&date.into(), &DataType::Date), "2023-12-31");

        let dt = date.and_hms_opt(23, 59, 0).unwrap();
        let dtype = DataType::Datetime(TimeUnit::Microseconds, Some("UTC".into()));
        assert_eq!(f.format_value(&dt.into(), &dtype), "2023-12-31 23:59:00 UTC");
        assert_eq!(
            f.format_value(
                &AnyValue::Duration(2_000, TimeUnit::Milliseconds),
                &DataType::Duration(TimeUnit::Milliseconds)
            ),
            "2s"
        );
    }

    #[test]
    fn test_header_variants() {
        let mut config = DisplayConfig::default();
        let dtype = DataType::Int64;

        let f = CellFormatter::new(&config);
        assert_eq!(f.header("foo", &dtype).unwrap().text, "foo\n---\ni64");

        config.tbl_hide_dtype_separator = true;
        let f = CellFormatter::new(&config);
        assert_eq!(f.header("foo", &dtype).unwrap().text, "foo\ni64");

        config.tbl_column_data_type_inline = true;
        let f = CellFormatter::new(&config);
        assert_eq!(f.header("foo", &dtype).unwrap().text, "foo (i64)");

        config.tbl_hide_column_names = true;
        let f = CellFormatter::new(&config);
        assert_eq!(f.header("foo", &dtype).unwrap().text, "i64");

        config.tbl_hide_column_data_types = true;
        let f = CellFormatter::new(&config);
        assert!(f.header("foo", &dtype).is_none());

        config.tbl_hide_column_names = false;
        let f = CellFormatter::new(&config);
        assert_eq!(f.header("foo", &dtype).unwrap().text, "foo");
    }

    #[test]
    fn test_numeric_alignment_override() {
        let mut config = DisplayConfig::default();
        config.tbl_cell_numeric_alignment = Some(Alignment::Right);
        let f = CellFormatter::new(&config);

        assert_eq!(f.alignment(&DataType::Float64), Alignment::Right);
        assert_eq!(f.alignment(&DataType::Decimal(None, 2)), Alignment::Right);
        assert_eq!(f.alignment(&DataType::String), Alignment::Left);
        assert_eq!(f.alignment(&DataType::Boolean), Alignment::Left);
    }
}
