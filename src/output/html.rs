//! HTML table output for notebook-style frontends

use std::io::Write;

use anyhow::Result;

use crate::config::DisplayConfig;
use crate::format::CellFormatter;
use crate::layout::{project, Slot};
use crate::model::Table;

use super::{shape_caption, OutputFormatter};

/// HTML table output
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlOutput;

impl HtmlOutput {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for HtmlOutput {
    fn render(&self, table: &Table, config: &DisplayConfig, writer: &mut dyn Write) -> Result<()> {
        let view = project(table.height(), table.width(), config.tbl_rows, config.tbl_cols);
        let formatter = CellFormatter::new(config);
        let ellipsis = html_escape(config.ellipsis());
        let columns = table.columns();

        writeln!(writer, "<div>")?;
        writeln!(writer, "<style>{}</style>", CSS_STYLES)?;
        if !config.tbl_hide_dataframe_shape && !config.tbl_dataframe_shape_below {
            writeln!(writer, "<small>{}</small>", shape_caption(table))?;
        }
        writeln!(writer, "<table border=\"1\" class=\"dataframe\">")?;

        // Header: names, then dtypes as a second row
        writeln!(writer, "<thead>")?;
        if !config.tbl_hide_column_names {
            write!(writer, "<tr>")?;
            for slot in &view.columns {
                match *slot {
                    Slot::Index(c) => write!(writer, "<th>{}</th>", html_escape(&columns[c].name))?,
                    Slot::Ellipsis => write!(writer, "<th>{}</th>", ellipsis)?,
                }
            }
            writeln!(writer, "</tr>")?;
        }
        if !config.tbl_hide_column_data_types {
            write!(writer, "<tr>")?;
            for slot in &view.columns {
                match *slot {
                    Slot::Index(c) => write!(
                        writer,
                        "<td>{}</td>",
                        html_escape(columns[c].dtype.to_string())
                    )?,
                    Slot::Ellipsis => write!(writer, "<td></td>")?,
                }
            }
            writeln!(writer, "</tr>")?;
        }
        writeln!(writer, "</thead>")?;

        writeln!(writer, "<tbody>")?;
        for row in &view.rows {
            write!(writer, "<tr>")?;
            for col in &view.columns {
                match (*row, *col) {
                    (Slot::Index(r), Slot::Index(c)) => {
                        let column = &columns[c];
                        let text = formatter.format_value(&column.values[r], &column.dtype);
                        write!(writer, "<td>{}</td>", html_escape(text))?;
                    }
                    _ => write!(writer, "<td>{}</td>", ellipsis)?,
                }
            }
            writeln!(writer, "</tr>")?;
        }
        writeln!(writer, "</tbody>")?;
        writeln!(writer, "</table>")?;

        if !config.tbl_hide_dataframe_shape && config.tbl_dataframe_shape_below {
            writeln!(writer, "<small>{}</small>", shape_caption(table))?;
        }
        writeln!(writer, "</div>")?;

        Ok(())
    }
}

fn html_escape(s: impl AsRef<str>) -> String {
    s.as_ref()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS_STYLES: &str = ".dataframe > thead > tr, .dataframe > tbody > tr { text-align: right; white-space: pre-wrap; }";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayOptions;
    use crate::model::{Column, DataType};

    fn render(table: &Table, options: DisplayOptions) -> String {
        let mut config = DisplayConfig::default();
        config.apply(&options);
        let mut buf = Vec::new();
        HtmlOutput::new().render(table, &config, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_html_structure() {
        let table = Table::new(vec![
            Column::new("a<b", DataType::String, ["x & y", "z"]),
            Column::new("n", DataType::Int64, [1i64, 2]),
        ])
        .unwrap();
        let html = render(&table, DisplayOptions::new());

        assert!(html.starts_with("<div>\n<style>"));
        assert!(html.contains("<small>shape: (2, 2)</small>\n<table border=\"1\" class=\"dataframe\">"));
        assert!(html.contains("<tr><th>a&lt;b</th><th>n</th></tr>"));
        assert!(html.contains("<tr><td>str</td><td>i64</td></tr>"));
        assert!(html.contains("<tr><td>x &amp; y</td><td>1</td></tr>"));
        assert!(html.ends_with("</table>\n</div>\n"));
    }

    #[test]
    fn test_html_projection() {
        let table = Table::new(vec![Column::new("n", DataType::Int64, 0i64..10)]).unwrap();
        let html = render(&table, DisplayOptions::new().tbl_rows(2));

        assert!(html.contains("<tr><td>0</td></tr>\n<tr><td>…</td></tr>\n<tr><td>9</td></tr>"));
        assert_eq!(html.matches("<tr>").count(), 5);
    }

    #[test]
    fn test_html_hidden_parts() {
        let table = Table::new(vec![Column::new("n", DataType::Int64, [1i64])]).unwrap();
        let html = render(
            &table,
            DisplayOptions::new()
                .tbl_hide_dataframe_shape(true)
                .tbl_hide_column_data_types(true),
        );
        assert!(!html.contains("shape"));
        assert!(!html.contains("i64"));
    }
}
