//! framefmt - Console rendering for columnar tables
//!
//! Renders a table as a bordered text grid (UTF-8 box drawing, ASCII or
//! Markdown), HTML or JSON, with row/column truncation, typed cell
//! formatting and width-aware wrapping, all driven by display options that
//! can be set process-wide or scoped to a single call.

pub mod config;
pub mod format;
pub mod layout;
pub mod model;
pub mod output;
pub mod parser;
pub mod show;

pub use config::{ConfigStore, DisplayConfig, DisplayOptions};
pub use model::{AnyValue, Column, DataType, Table};
pub use show::{Renderer, RowLimit};
