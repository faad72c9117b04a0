//! Table layout: row/column projection, width resolution and grid assembly

mod grid;
mod projector;
mod style;
mod width;

pub use grid::Grid;
pub use projector::{project, ProjectedView, Slot};
pub use style::{BorderStyle, Rule};
pub use width::{resolve, text_width, wrap};

use crate::config::DisplayConfig;
use crate::format::{CellFormatter, RenderedCell};
use crate::model::Table;

/// Project, format and size `table` into a grid ready to render
pub fn build_grid(table: &Table, config: &DisplayConfig) -> Grid {
    let view = project(table.height(), table.width(), config.tbl_rows, config.tbl_cols);
    let formatter = CellFormatter::new(config);
    let style = BorderStyle::for_formatting(config.formatting(), config.tbl_rounded_corners);
    let columns = table.columns();

    let mut header = if config.tbl_hide_column_names && config.tbl_hide_column_data_types {
        None
    } else {
        let cells = view
            .columns
            .iter()
            .map(|slot| match *slot {
                Slot::Index(c) => formatter
                    .header(&columns[c].name, &columns[c].dtype)
                    .unwrap_or_else(|| RenderedCell::new("", config.tbl_cell_alignment)),
                Slot::Ellipsis => formatter.ellipsis(),
            })
            .collect();
        Some(cells)
    };

    let mut body: Vec<Vec<RenderedCell>> = view
        .rows
        .iter()
        .map(|row| {
            view.columns
                .iter()
                .map(|col| match (*row, *col) {
                    (Slot::Index(r), Slot::Index(c)) => {
                        let column = &columns[c];
                        formatter.format(&column.values[r], &column.dtype)
                    }
                    (Slot::Ellipsis, Slot::Index(c)) => formatter.ellipsis_for(&columns[c].dtype),
                    (_, Slot::Ellipsis) => formatter.ellipsis(),
                })
                .collect()
        })
        .collect();

    if style.single_line {
        let header_cells = header.iter_mut().flatten();
        for cell in header_cells.chain(body.iter_mut().flatten()) {
            if cell.text.contains(['\n', '|']) {
                cell.text = cell.text.replace('|', "\\|").replace('\n', " ");
            }
        }
    }

    let budget = if style.single_line {
        None
    } else {
        config.tbl_width_chars
    };
    let widths = resolve(
        header.as_deref(),
        &body,
        view.columns.len(),
        style.overhead(view.columns.len()),
        budget,
    );

    Grid {
        header,
        body,
        widths,
        style,
    }
}
