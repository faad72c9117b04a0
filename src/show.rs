//! Render orchestration: resolve configuration, render, and hand the result
//! to a text writer or a rich display sink

use std::io::Write;
use std::sync::Mutex;

use anyhow::{anyhow, Result};

use crate::config::{ConfigStore, DisplayConfig, DisplayOptions};
use crate::model::Table;
use crate::output::{HtmlOutput, OutputFormatter, TextOutput};

/// Rows shown by [`Renderer::show`] when no limit is given
pub const DEFAULT_SHOW_LIMIT: i64 = 5;

/// Row limit of a single `show` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLimit {
    /// Every row
    All,
    /// The first `n` rows; a negative `n` drops that many rows from the end
    Head(i64),
}

impl Default for RowLimit {
    fn default() -> Self {
        RowLimit::Head(DEFAULT_SHOW_LIMIT)
    }
}

impl RowLimit {
    /// Number of leading rows kept out of `height`
    pub fn rows(self, height: usize) -> usize {
        match self {
            RowLimit::All => height,
            RowLimit::Head(n) if n >= 0 => height.min(usize::try_from(n).unwrap_or(usize::MAX)),
            RowLimit::Head(n) => {
                let drop = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
                height.saturating_sub(drop)
            }
        }
    }
}

impl From<Option<i64>> for RowLimit {
    fn from(limit: Option<i64>) -> Self {
        limit.map_or(RowLimit::All, RowLimit::Head)
    }
}

/// A display host able to show tables in a richer form than plain text
pub trait RichDisplay {
    /// Whether the host is active for this call
    fn can_render_rich(&self) -> bool;

    /// Hand over the (already truncated) table and the configuration it
    /// should be displayed with
    fn emit_rich(&self, table: &Table, config: &DisplayConfig) -> Result<()>;
}

impl<T: RichDisplay + ?Sized> RichDisplay for &T {
    fn can_render_rich(&self) -> bool {
        (**self).can_render_rich()
    }

    fn emit_rich(&self, table: &Table, config: &DisplayConfig) -> Result<()> {
        (**self).emit_rich(table, config)
    }
}

/// Rich display sink that writes the HTML form of each table
pub struct HtmlDisplay<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> HtmlDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write> RichDisplay for HtmlDisplay<W> {
    fn can_render_rich(&self) -> bool {
        true
    }

    fn emit_rich(&self, table: &Table, config: &DisplayConfig) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("HTML display writer poisoned"))?;
        HtmlOutput::new().render(table, config, &mut *writer)
    }
}

/// What a `show` call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowOutcome {
    /// Plain text was written to the output
    Text(String),
    /// The table was handed to the rich display sink
    Rich,
}

/// Drives the render pipeline against a configuration store
pub struct Renderer<'s> {
    store: &'s ConfigStore,
    rich: Option<Box<dyn RichDisplay + 's>>,
}

impl Default for Renderer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<'static> {
    /// Renderer over the process-wide defaults
    pub fn new() -> Self {
        Self::with_store(ConfigStore::global())
    }
}

impl<'s> Renderer<'s> {
    pub fn with_store(store: &'s ConfigStore) -> Self {
        Self { store, rich: None }
    }

    /// Register a rich display sink, consulted once per `show` call
    pub fn with_rich_display(mut self, rich: impl RichDisplay + 's) -> Self {
        self.rich = Some(Box::new(rich));
        self
    }

    /// Render with the ambient row limit, which keeps the head and tail of
    /// long tables around an ellipsis row
    pub fn render(&self, table: &Table, overrides: &DisplayOptions) -> String {
        let _guard = self.store.scoped(overrides.clone());
        let config = self.store.snapshot();
        TextOutput::new().format(table, &config)
    }

    /// Show the first rows of `table`
    ///
    /// The limit is head-only: no ellipsis row is inserted. Overrides last
    /// for this call only. With an active rich display sink the truncated
    /// table goes there exactly once and no text is written.
    pub fn show(
        &self,
        table: &Table,
        limit: RowLimit,
        overrides: &DisplayOptions,
        out: &mut dyn Write,
    ) -> Result<ShowOutcome> {
        overrides.validate()?;
        let _guard = self.store.scoped(overrides.clone());
        let mut config = self.store.snapshot();
        config.tbl_rows = None;

        let rows = limit.rows(table.height());
        let table = table.head(rows);
        tracing::debug!(?limit, rows, columns = table.width(), "Showing table");

        if let Some(rich) = self.rich.as_ref().filter(|r| r.can_render_rich()) {
            tracing::trace!("Emitting to rich display");
            rich.emit_rich(&table, &config)?;
            return Ok(ShowOutcome::Rich);
        }

        let text = TextOutput::new().format(&table, &config);
        writeln!(out, "{}", text)?;
        Ok(ShowOutcome::Text(text))
    }
}
