//! Display configuration: option enums, the resolved per-call snapshot, and
//! the store that holds process-wide defaults.

mod options;
mod store;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use options::{DisplayOptions, OPTION_NAMES};
pub use store::{ConfigStore, ScopeGuard};

/// Errors raised while reading or applying display options
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown display option: {0}")]
    UnknownOption(String),
    #[error("invalid value for {option}: {value:?}")]
    InvalidValue { option: String, value: String },
    #[error("failed to read configuration: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(option: &str, value: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            option: option.to_string(),
            value: value.into(),
        }
    }
}

/// Output format for rendered tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Border and rule style of the rendered grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TableFormatting {
    Utf8Full,
    #[default]
    Utf8FullCondensed,
    Utf8NoBorders,
    Utf8BordersOnly,
    Utf8HorizontalOnly,
    AsciiFull,
    AsciiFullCondensed,
    AsciiNoBorders,
    AsciiBordersOnly,
    AsciiBordersOnlyCondensed,
    AsciiHorizontalOnly,
    AsciiMarkdown,
    Markdown,
    Nothing,
}

impl TableFormatting {
    pub const ALL: [TableFormatting; 14] = [
        TableFormatting::Utf8Full,
        TableFormatting::Utf8FullCondensed,
        TableFormatting::Utf8NoBorders,
        TableFormatting::Utf8BordersOnly,
        TableFormatting::Utf8HorizontalOnly,
        TableFormatting::AsciiFull,
        TableFormatting::AsciiFullCondensed,
        TableFormatting::AsciiNoBorders,
        TableFormatting::AsciiBordersOnly,
        TableFormatting::AsciiBordersOnlyCondensed,
        TableFormatting::AsciiHorizontalOnly,
        TableFormatting::AsciiMarkdown,
        TableFormatting::Markdown,
        TableFormatting::Nothing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TableFormatting::Utf8Full => "UTF8_FULL",
            TableFormatting::Utf8FullCondensed => "UTF8_FULL_CONDENSED",
            TableFormatting::Utf8NoBorders => "UTF8_NO_BORDERS",
            TableFormatting::Utf8BordersOnly => "UTF8_BORDERS_ONLY",
            TableFormatting::Utf8HorizontalOnly => "UTF8_HORIZONTAL_ONLY",
            TableFormatting::AsciiFull => "ASCII_FULL",
            TableFormatting::AsciiFullCondensed => "ASCII_FULL_CONDENSED",
            TableFormatting::AsciiNoBorders => "ASCII_NO_BORDERS",
            TableFormatting::AsciiBordersOnly => "ASCII_BORDERS_ONLY",
            TableFormatting::AsciiBordersOnlyCondensed => "ASCII_BORDERS_ONLY_CONDENSED",
            TableFormatting::AsciiHorizontalOnly => "ASCII_HORIZONTAL_ONLY",
            TableFormatting::AsciiMarkdown => "ASCII_MARKDOWN",
            TableFormatting::Markdown => "MARKDOWN",
            TableFormatting::Nothing => "NOTHING",
        }
    }

    /// The ASCII counterpart of a UTF-8 style; ASCII styles map to themselves
    pub fn to_ascii(self) -> TableFormatting {
        match self {
            TableFormatting::Utf8Full => TableFormatting::AsciiFull,
            TableFormatting::Utf8FullCondensed => TableFormatting::AsciiFullCondensed,
            TableFormatting::Utf8NoBorders => TableFormatting::AsciiNoBorders,
            TableFormatting::Utf8BordersOnly => TableFormatting::AsciiBordersOnly,
            TableFormatting::Utf8HorizontalOnly => TableFormatting::AsciiHorizontalOnly,
            other => other,
        }
    }

    pub fn is_ascii(self) -> bool {
        self.name().starts_with("ASCII")
    }

    pub fn is_markdown(self) -> bool {
        matches!(self, TableFormatting::AsciiMarkdown | TableFormatting::Markdown)
    }
}

impl fmt::Display for TableFormatting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableFormatting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableFormatting::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ConfigError::invalid("tbl_formatting", s))
    }
}

impl TryFrom<String> for TableFormatting {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TableFormatting> for String {
    fn from(f: TableFormatting) -> Self {
        f.name().to_string()
    }
}

/// Horizontal placement of text inside a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    fn parse_for(option: &str, s: &str) -> Result<Self, ConfigError> {
        match s.to_ascii_uppercase().as_str() {
            "LEFT" => Ok(Alignment::Left),
            "CENTER" => Ok(Alignment::Center),
            "RIGHT" => Ok(Alignment::Right),
            _ => Err(ConfigError::invalid(option, s)),
        }
    }
}

impl FromStr for Alignment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alignment::parse_for("tbl_cell_alignment", s)
    }
}

/// Float rendering mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatFmt {
    /// Decimal notation in a normal magnitude range, exponential outside it
    #[default]
    Mixed,
    /// Always the full decimal expansion
    Full,
}

impl FromStr for FloatFmt {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mixed" => Ok(FloatFmt::Mixed),
            "full" => Ok(FloatFmt::Full),
            _ => Err(ConfigError::invalid("fmt_float", s)),
        }
    }
}

/// Every display option resolved for one render call
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Rows shown before a head/tail split; `None` shows every row
    pub tbl_rows: Option<usize>,
    /// Columns shown before an ellipsis column is inserted; `None` shows all
    pub tbl_cols: Option<usize>,
    pub float_precision: Option<usize>,
    pub fmt_float: FloatFmt,
    pub trim_decimal_zeros: bool,
    pub decimal_separator: char,
    pub thousands_separator: Option<char>,
    pub fmt_str_lengths: usize,
    /// Maximum list elements before truncation; `None` never truncates
    pub fmt_table_cell_list_len: Option<usize>,
    pub tbl_cell_alignment: Alignment,
    pub tbl_cell_numeric_alignment: Option<Alignment>,
    pub tbl_column_data_type_inline: bool,
    pub tbl_hide_column_data_types: bool,
    pub tbl_hide_column_names: bool,
    pub tbl_hide_dtype_separator: bool,
    pub tbl_hide_dataframe_shape: bool,
    pub tbl_dataframe_shape_below: bool,
    pub tbl_formatting: TableFormatting,
    pub tbl_rounded_corners: bool,
    pub ascii_tables: bool,
    /// Total width budget in characters; `None` is unconstrained
    pub tbl_width_chars: Option<usize>,
    pub null_value: String,
    pub date_format: String,
    pub time_format: String,
    pub datetime_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tbl_rows: Some(8),
            tbl_cols: Some(8),
            float_precision: None,
            fmt_float: FloatFmt::Mixed,
            trim_decimal_zeros: true,
            decimal_separator: '.',
            thousands_separator: None,
            fmt_str_lengths: 30,
            fmt_table_cell_list_len: Some(3),
            tbl_cell_alignment: Alignment::Left,
            tbl_cell_numeric_alignment: None,
            tbl_column_data_type_inline: false,
            tbl_hide_column_data_types: false,
            tbl_hide_column_names: false,
            tbl_hide_dtype_separator: false,
            tbl_hide_dataframe_shape: false,
            tbl_dataframe_shape_below: false,
            tbl_formatting: TableFormatting::default(),
            tbl_rounded_corners: false,
            ascii_tables: false,
            tbl_width_chars: None,
            null_value: "null".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M:%S%.f".to_string(),
            datetime_format: "%Y-%m-%d %H:%M:%S%.f".to_string(),
        }
    }
}

/// Negative limits mean "no limit"
fn limit(value: i64) -> Option<usize> {
    usize::try_from(value).ok()
}

impl DisplayConfig {
    /// Overlay every option that `options` sets
    pub fn apply(&mut self, options: &DisplayOptions) {
        if let Some(v) = options.tbl_rows {
            self.tbl_rows = limit(v);
        }
        if let Some(v) = options.tbl_cols {
            self.tbl_cols = limit(v);
        }
        if let Some(v) = options.float_precision {
            self.float_precision = limit(v);
        }
        if let Some(v) = options.fmt_float {
            self.fmt_float = v;
        }
        if let Some(v) = options.trim_decimal_zeros {
            self.trim_decimal_zeros = v;
        }
        if let Some(v) = options.decimal_separator {
            self.decimal_separator = v;
        }
        if let Some(ref v) = options.thousands_separator {
            self.thousands_separator = v.chars().next();
        }
        if let Some(v) = options.fmt_str_lengths {
            self.fmt_str_lengths = v;
        }
        if let Some(v) = options.fmt_table_cell_list_len {
            self.fmt_table_cell_list_len = usize::try_from(v).ok().filter(|&n| n > 0);
        }
        if let Some(v) = options.tbl_cell_alignment {
            self.tbl_cell_alignment = v;
        }
        if let Some(v) = options.tbl_cell_numeric_alignment {
            self.tbl_cell_numeric_alignment = Some(v);
        }
        if let Some(v) = options.tbl_column_data_type_inline {
            self.tbl_column_data_type_inline = v;
        }
        if let Some(v) = options.tbl_hide_column_data_types {
            self.tbl_hide_column_data_types = v;
        }
        if let Some(v) = options.tbl_hide_column_names {
            self.tbl_hide_column_names = v;
        }
        if let Some(v) = options.tbl_hide_dtype_separator {
            self.tbl_hide_dtype_separator = v;
        }
        if let Some(v) = options.tbl_hide_dataframe_shape {
            self.tbl_hide_dataframe_shape = v;
        }
        if let Some(v) = options.tbl_dataframe_shape_below {
            self.tbl_dataframe_shape_below = v;
        }
        if let Some(v) = options.tbl_formatting {
            self.tbl_formatting = v;
        }
        if let Some(v) = options.tbl_rounded_corners {
            self.tbl_rounded_corners = v;
        }
        if let Some(v) = options.ascii_tables {
            self.ascii_tables = v;
        }
        if let Some(v) = options.tbl_width_chars {
            self.tbl_width_chars = limit(v).filter(|&w| w > 0);
        }
        if let Some(ref v) = options.null_value {
            self.null_value = v.clone();
        }
        if let Some(ref v) = options.date_format {
            self.date_format = v.clone();
        }
        if let Some(ref v) = options.time_format {
            self.time_format = v.clone();
        }
        if let Some(ref v) = options.datetime_format {
            self.datetime_format = v.clone();
        }
    }

    /// Border style after `ascii_tables` has been taken into account
    pub fn formatting(&self) -> TableFormatting {
        if self.ascii_tables {
            self.tbl_formatting.to_ascii()
        } else {
            self.tbl_formatting
        }
    }

    /// Marker for omitted rows, columns and truncated text
    pub fn ellipsis(&self) -> &'static str {
        if self.formatting().is_ascii() {
            "..."
        } else {
            "…"
        }
    }

    /// Markdown headers cannot span lines, so dtypes fold into the name
    pub fn dtype_inline(&self) -> bool {
        self.tbl_column_data_type_inline || self.formatting().is_markdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting_names_round_trip() {
        for f in TableFormatting::ALL {
            assert_eq!(f.name().parse::<TableFormatting>().unwrap(), f);
        }
    }

    #[test]
    fn test_unknown_formatting_is_rejected() {
        let err = "UTF9_FULL".parse::<TableFormatting>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for tbl_formatting: \"UTF9_FULL\""
        );
    }

    #[test]
    fn test_ascii_tables_forces_ascii_glyphs() {
        let mut config = DisplayConfig::default();
        assert_eq!(config.formatting(), TableFormatting::Utf8FullCondensed);
        assert_eq!(config.ellipsis(), "…");

        config.ascii_tables = true;
        assert_eq!(config.formatting(), TableFormatting::AsciiFullCondensed);
        assert_eq!(config.ellipsis(), "...");
    }

    #[test]
    fn test_negative_limits_are_unbounded() {
        let mut config = DisplayConfig::default();
        config.apply(
            &DisplayOptions::new()
                .tbl_rows(-1)
                .tbl_cols(-1)
                .tbl_width_chars(-80)
                .fmt_table_cell_list_len(0),
        );
        assert_eq!(config.tbl_rows, None);
        assert_eq!(config.tbl_cols, None);
        assert_eq!(config.tbl_width_chars, None);
        assert_eq!(config.fmt_table_cell_list_len, None);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("TABLE".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_markdown_folds_dtypes_inline() {
        let mut config = DisplayConfig::default();
        assert!(!config.dtype_inline());
        config.tbl_formatting = TableFormatting::Markdown;
        assert!(config.dtype_inline());
    }
}
