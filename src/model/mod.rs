//! Data model for the tables being rendered

mod schema;
mod table;

pub use schema::{DataType, Field, TimeUnit};
pub use table::{AnyValue, Column, Table, TableError};
