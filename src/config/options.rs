//! Sparse display option overrides, as set by callers, the environment, or a
//! saved configuration file.

use serde::{Deserialize, Serialize};

use super::{Alignment, ConfigError, FloatFmt, TableFormatting};
use crate::format::is_valid_format;

/// Prefix of the environment variables read by [`DisplayOptions::from_env`]
pub const ENV_PREFIX: &str = "FRAMEFMT_";

/// Every option name accepted by [`DisplayOptions::set`]
pub const OPTION_NAMES: [&str; 25] = [
    "tbl_rows",
    "tbl_cols",
    "float_precision",
    "fmt_float",
    "trim_decimal_zeros",
    "decimal_separator",
    "thousands_separator",
    "fmt_str_lengths",
    "fmt_table_cell_list_len",
    "tbl_cell_alignment",
    "tbl_cell_numeric_alignment",
    "tbl_column_data_type_inline",
    "tbl_hide_column_data_types",
    "tbl_hide_column_names",
    "tbl_hide_dtype_separator",
    "tbl_hide_dataframe_shape",
    "tbl_dataframe_shape_below",
    "tbl_formatting",
    "tbl_rounded_corners",
    "ascii_tables",
    "tbl_width_chars",
    "null_value",
    "date_format",
    "time_format",
    "datetime_format",
];

/// A set of option overrides; unset fields inherit from the layer below
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_rows: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_cols: Option<i64>,
    /// Negative values return to the mixed default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub float_precision: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmt_float: Option<FloatFmt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_decimal_zeros: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_separator: Option<char>,
    /// An empty string disables grouping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thousands_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmt_str_lengths: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmt_table_cell_list_len: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_cell_alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_cell_numeric_alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_column_data_type_inline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_hide_column_data_types: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_hide_column_names: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_hide_dtype_separator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_hide_dataframe_shape: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_dataframe_shape_below: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_formatting: Option<TableFormatting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_rounded_corners: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascii_tables: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbl_width_chars: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime_format: Option<String>,
}

fn parse_bool(option: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(option, value)),
    }
}

fn parse_int<T: std::str::FromStr>(option: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(option, value))
}

fn parse_format(option: &str, value: &str) -> Result<String, ConfigError> {
    if is_valid_format(value) {
        Ok(value.to_string())
    } else {
        Err(ConfigError::invalid(option, value))
    }
}

fn parse_char(option: &str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::invalid(option, value)),
    }
}

impl DisplayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no option is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Set an option from its textual name and value
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "tbl_rows" => self.tbl_rows = Some(parse_int(key, value)?),
            "tbl_cols" => self.tbl_cols = Some(parse_int(key, value)?),
            "float_precision" => self.float_precision = Some(parse_int(key, value)?),
            "fmt_float" => self.fmt_float = Some(value.parse()?),
            "trim_decimal_zeros" => self.trim_decimal_zeros = Some(parse_bool(key, value)?),
            "decimal_separator" => self.decimal_separator = Some(parse_char(key, value)?),
            "thousands_separator" => {
                if value.chars().count() > 1 {
                    return Err(ConfigError::invalid(key, value));
                }
                self.thousands_separator = Some(value.to_string());
            }
            "fmt_str_lengths" => self.fmt_str_lengths = Some(parse_int(key, value)?),
            "fmt_table_cell_list_len" => {
                self.fmt_table_cell_list_len = Some(parse_int(key, value)?)
            }
            "tbl_cell_alignment" => {
                self.tbl_cell_alignment = Some(Alignment::parse_for(key, value)?)
            }
            "tbl_cell_numeric_alignment" => {
                self.tbl_cell_numeric_alignment = Some(Alignment::parse_for(key, value)?)
            }
            "tbl_column_data_type_inline" => {
                self.tbl_column_data_type_inline = Some(parse_bool(key, value)?)
            }
            "tbl_hide_column_data_types" => {
                self.tbl_hide_column_data_types = Some(parse_bool(key, value)?)
            }
            "tbl_hide_column_names" => self.tbl_hide_column_names = Some(parse_bool(key, value)?),
            "tbl_hide_dtype_separator" => {
                self.tbl_hide_dtype_separator = Some(parse_bool(key, value)?)
            }
            "tbl_hide_dataframe_shape" => {
                self.tbl_hide_dataframe_shape = Some(parse_bool(key, value)?)
            }
            "tbl_dataframe_shape_below" => {
                self.tbl_dataframe_shape_below = Some(parse_bool(key, value)?)
            }
            "tbl_formatting" => self.tbl_formatting = Some(value.parse()?),
            "tbl_rounded_corners" => self.tbl_rounded_corners = Some(parse_bool(key, value)?),
            "ascii_tables" => self.ascii_tables = Some(parse_bool(key, value)?),
            "tbl_width_chars" => self.tbl_width_chars = Some(parse_int(key, value)?),
            "null_value" => self.null_value = Some(value.to_string()),
            "date_format" => self.date_format = Some(parse_format(key, value)?),
            "time_format" => self.time_format = Some(parse_format(key, value)?),
            "datetime_format" => self.datetime_format = Some(parse_format(key, value)?),
            _ => return Err(ConfigError::UnknownOption(key.to_string())),
        }
        Ok(())
    }

    /// Parse a `key=value` assignment
    pub fn set_assignment(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::UnknownOption(assignment.to_string()))?;
        self.set(key.trim(), value)
    }

    /// Read `FRAMEFMT_<OPTION>` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Read options from `FRAMEFMT_<OPTION>` style name/value pairs
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (name, value) in vars {
            let Some(key) = name.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let key = key.to_ascii_lowercase();
            if OPTION_NAMES.contains(&key.as_str()) {
                options.set(&key, value.as_ref())?;
            } else {
                tracing::debug!(variable = name.as_ref(), "Ignoring unrecognised variable");
            }
        }
        Ok(options)
    }

    /// Serialize the set options as JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load options previously saved with [`DisplayOptions::to_json`]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the free-form string options set through builders or serde
    pub fn validate(&self) -> Result<(), ConfigError> {
        let formats = [
            ("date_format", &self.date_format),
            ("time_format", &self.time_format),
            ("datetime_format", &self.datetime_format),
        ];
        for (option, format) in formats {
            if let Some(format) = format {
                parse_format(option, format)?;
            }
        }
        if let Some(separator) = &self.thousands_separator {
            if separator.chars().count() > 1 {
                return Err(ConfigError::invalid("thousands_separator", separator));
            }
        }
        Ok(())
    }

    /// Overlay the options set in `other`
    pub fn merge(&mut self, other: &DisplayOptions) {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )*
            };
        }
        overlay!(
            tbl_rows,
            tbl_cols,
            float_precision,
            fmt_float,
            trim_decimal_zeros,
            decimal_separator,
            thousands_separator,
            fmt_str_lengths,
            fmt_table_cell_list_len,
            tbl_cell_alignment,
            tbl_cell_numeric_alignment,
            tbl_column_data_type_inline,
            tbl_hide_column_data_types,
            tbl_hide_column_names,
            tbl_hide_dtype_separator,
            tbl_hide_dataframe_shape,
            tbl_dataframe_shape_below,
            tbl_formatting,
            tbl_rounded_corners,
            ascii_tables,
            tbl_width_chars,
            null_value,
            date_format,
            time_format,
            datetime_format,
        );
    }

    /// Rows shown before a head/tail split (negative shows all)
    pub fn tbl_rows(mut self, rows: i64) -> Self {
        self.tbl_rows = Some(rows);
        self
    }

    /// Columns shown before an ellipsis column (negative shows all)
    pub fn tbl_cols(mut self, cols: i64) -> Self {
        self.tbl_cols = Some(cols);
        self
    }

    pub fn float_precision(mut self, precision: i64) -> Self {
        self.float_precision = Some(precision);
        self
    }

    pub fn fmt_float(mut self, mode: FloatFmt) -> Self {
        self.fmt_float = Some(mode);
        self
    }

    pub fn trim_decimal_zeros(mut self, trim: bool) -> Self {
        self.trim_decimal_zeros = Some(trim);
        self
    }

    pub fn decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = Some(separator);
        self
    }

    pub fn thousands_separator(mut self, separator: Option<char>) -> Self {
        self.thousands_separator = Some(separator.map(String::from).unwrap_or_default());
        self
    }

    pub fn fmt_str_lengths(mut self, len: usize) -> Self {
        self.fmt_str_lengths = Some(len);
        self
    }

    /// Maximum list elements shown (zero or negative disables truncation)
    pub fn fmt_table_cell_list_len(mut self, len: i64) -> Self {
        self.fmt_table_cell_list_len = Some(len);
        self
    }

    pub fn tbl_cell_alignment(mut self, alignment: Alignment) -> Self {
        self.tbl_cell_alignment = Some(alignment);
        self
    }

    pub fn tbl_cell_numeric_alignment(mut self, alignment: Alignment) -> Self {
        self.tbl_cell_numeric_alignment = Some(alignment);
        self
    }

    pub fn tbl_column_data_type_inline(mut self, inline: bool) -> Self {
        self.tbl_column_data_type_inline = Some(inline);
        self
    }

    pub fn tbl_hide_column_data_types(mut self, hide: bool) -> Self {
        self.tbl_hide_column_data_types = Some(hide);
        self
    }

    pub fn tbl_hide_column_names(mut self, hide: bool) -> Self {
        self.tbl_hide_column_names = Some(hide);
        self
    }

    pub fn tbl_hide_dtype_separator(mut self, hide: bool) -> Self {
        self.tbl_hide_dtype_separator = Some(hide);
        self
    }

    pub fn tbl_hide_dataframe_shape(mut self, hide: bool) -> Self {
        self.tbl_hide_dataframe_shape = Some(hide);
        self
    }

    pub fn tbl_dataframe_shape_below(mut self, below: bool) -> Self {
        self.tbl_dataframe_shape_below = Some(below);
        self
    }

    pub fn tbl_formatting(mut self, formatting: TableFormatting) -> Self {
        self.tbl_formatting = Some(formatting);
        self
    }

    pub fn tbl_rounded_corners(mut self, rounded: bool) -> Self {
        self.tbl_rounded_corners = Some(rounded);
        self
    }

    pub fn ascii_tables(mut self, ascii: bool) -> Self {
        self.ascii_tables = Some(ascii);
        self
    }

    /// Total width budget (zero or negative is unconstrained)
    pub fn tbl_width_chars(mut self, width: i64) -> Self {
        self.tbl_width_chars = Some(width);
        self
    }

    pub fn null_value(mut self, token: impl Into<String>) -> Self {
        self.null_value = Some(token.into());
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    pub fn datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = Some(format.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_by_name() {
        let mut options = DisplayOptions::new();
        options.set("tbl_rows", "10").unwrap();
        options.set("tbl_formatting", "ASCII_FULL").unwrap();
        options.set("tbl_cell_alignment", "right").unwrap();
        options.set("ascii_tables", "1").unwrap();

        assert_eq!(options.tbl_rows, Some(10));
        assert_eq!(options.tbl_formatting, Some(TableFormatting::AsciiFull));
        assert_eq!(options.tbl_cell_alignment, Some(Alignment::Right));
        assert_eq!(options.ascii_tables, Some(true));
    }

    #[test]
    fn test_invalid_values_name_the_option() {
        let mut options = DisplayOptions::new();

        let err = options.set("tbl_cell_alignment", "DIAGONAL").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref option, ref value }
                if option == "tbl_cell_alignment" && value == "DIAGONAL"
        ));

        let err = options.set("tbl_cell_numeric_alignment", "UP").unwrap_err();
        assert!(err.to_string().contains("tbl_cell_numeric_alignment"));

        let err = options.set("tbl_rows", "many").unwrap_err();
        assert!(err.to_string().contains("tbl_rows"));

        assert!(matches!(
            options.set("tbl_colour", "red"),
            Err(ConfigError::UnknownOption(_))
        ));
        assert!(options.is_empty());
    }

    #[test]
    fn test_temporal_formats_are_checked() {
        let mut options = DisplayOptions::new();
        options.set("date_format", "%d/%m/%Y").unwrap();
        assert_eq!(options.date_format.as_deref(), Some("%d/%m/%Y"));

        for key in ["date_format", "time_format", "datetime_format"] {
            let err = options.set(key, "%Q").unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref option, ref value }
                    if option == key && value == "%Q"
            ));
        }

        let err = DisplayOptions::from_json(r#"{"time_format": "%H:%Q"}"#).unwrap_err();
        assert!(err.to_string().contains("time_format"));
        assert!(DisplayOptions::new().datetime_format("%Q").validate().is_err());
        assert!(DisplayOptions::new().date_format("%Y").validate().is_ok());
    }

    #[test]
    fn test_from_vars() {
        let options = DisplayOptions::from_vars([
            ("FRAMEFMT_TBL_COLS", "4"),
            ("FRAMEFMT_FMT_FLOAT", "full"),
            ("FRAMEFMT_SOMETHING_ELSE", "x"),
            ("HOME", "/root"),
        ])
        .unwrap();

        assert_eq!(options.tbl_cols, Some(4));
        assert_eq!(options.fmt_float, Some(FloatFmt::Full));
        assert!(DisplayOptions::from_vars([("FRAMEFMT_TBL_FORMATTING", "FANCY")]).is_err());
    }

    #[test]
    fn test_json_save_and_load() {
        let options = DisplayOptions::new()
            .tbl_rows(3)
            .tbl_formatting(TableFormatting::Markdown)
            .thousands_separator(Some(','));
        let json = options.to_json().unwrap();
        assert!(json.contains("\"MARKDOWN\""));
        assert!(!json.contains("tbl_cols"));
        assert_eq!(DisplayOptions::from_json(&json).unwrap(), options);

        assert!(DisplayOptions::from_json(r#"{"tbl_formatting": "FANCY"}"#).is_err());
        assert!(DisplayOptions::from_json(r#"{"not_an_option": 1}"#).is_err());
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut base = DisplayOptions::new().tbl_rows(3).tbl_cols(4);
        base.merge(&DisplayOptions::new().tbl_cols(9));
        assert_eq!(base.tbl_rows, Some(3));
        assert_eq!(base.tbl_cols, Some(9));
    }

    #[test]
    fn test_option_names_are_all_settable() {
        for name in OPTION_NAMES {
            let mut options = DisplayOptions::new();
            let err = options.set(name, "\u{1F600}\u{1F600}");
            assert!(!matches!(err, Err(ConfigError::UnknownOption(_))), "{name}");
        }
    }
}
