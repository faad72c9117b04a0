//! Row and column selection with ellipsis placeholders

/// One displayed row or column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Position in the source table
    Index(usize),
    /// Synthetic marker for omitted entries
    Ellipsis,
}

/// The rows and columns chosen for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedView {
    pub rows: Vec<Slot>,
    pub columns: Vec<Slot>,
}

impl ProjectedView {
    pub fn has_ellipsis_row(&self) -> bool {
        self.rows.contains(&Slot::Ellipsis)
    }

    pub fn has_ellipsis_column(&self) -> bool {
        self.columns.contains(&Slot::Ellipsis)
    }
}

/// Keep `ceil(limit/2)` leading and `floor(limit/2)` trailing entries with
/// one ellipsis between them, or everything when within the limit
fn split(len: usize, limit: Option<usize>) -> Vec<Slot> {
    match limit {
        Some(limit) if len > limit => {
            let head = limit.div_ceil(2);
            let tail = limit / 2;
            (0..head)
                .map(Slot::Index)
                .chain(std::iter::once(Slot::Ellipsis))
                .chain((len - tail..len).map(Slot::Index))
                .collect()
        }
        _ => (0..len).map(Slot::Index).collect(),
    }
}

/// Select the displayed rows and columns of a `height` x `width` table
pub fn project(
    height: usize,
    width: usize,
    row_limit: Option<usize>,
    col_limit: Option<usize>,
) -> ProjectedView {
    let view = ProjectedView {
        rows: split(height, row_limit),
        columns: split(width, col_limit),
    };
    tracing::debug!(
        height,
        width,
        shown_rows = view.rows.len(),
        shown_columns = view.columns.len(),
        ellipsis_row = view.has_ellipsis_row(),
        ellipsis_column = view.has_ellipsis_column(),
        "Projected table view"
    );
    view
}
