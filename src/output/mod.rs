//! Output formatting for tables

mod html;
mod json;
mod text;

use std::io::Write;

use anyhow::Result;

use crate::config::{DisplayConfig, OutputFormat};
use crate::model::Table;

pub use html::HtmlOutput;
pub use json::JsonOutput;
pub use text::TextOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a table to a writer under a resolved configuration
    fn render(&self, table: &Table, config: &DisplayConfig, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Table => Box::new(TextOutput::new()),
            OutputFormat::Html => Box::new(HtmlOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// The `shape: (rows, cols)` caption
pub(crate) fn shape_caption(table: &Table) -> String {
    let (rows, cols) = table.shape();
    format!("shape: ({}, {})", rows, cols)
}
