//! Plain-text grid output (UTF-8 box drawing, ASCII, Markdown)

use std::fmt;
use std::io::Write;

use anyhow::Result;

use crate::config::{ConfigStore, DisplayConfig};
use crate::layout::build_grid;
use crate::model::Table;

use super::{shape_caption, OutputFormatter};

/// Text grid output
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOutput;

impl TextOutput {
    pub fn new() -> Self {
        Self
    }

    /// Render the grid and shape caption, without a trailing newline
    pub fn format(&self, table: &Table, config: &DisplayConfig) -> String {
        let grid = build_grid(table, config).render();
        tracing::trace!(
            rows = table.height(),
            columns = table.width(),
            formatting = %config.formatting(),
            "Rendered text grid"
        );

        if config.tbl_hide_dataframe_shape {
            return grid;
        }
        let caption = shape_caption(table);
        if config.tbl_dataframe_shape_below {
            format!("{}\n{}", grid, caption)
        } else {
            format!("{}\n{}", caption, grid)
        }
    }
}

impl OutputFormatter for TextOutput {
    fn render(&self, table: &Table, config: &DisplayConfig, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "{}", self.format(table, config))?;
        Ok(())
    }
}

/// Renders with the process-wide defaults, splitting long tables around an
/// ellipsis row
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = ConfigStore::global().snapshot();
        f.write_str(&TextOutput::new().format(self, &config))
    }
}
