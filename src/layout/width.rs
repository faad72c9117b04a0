//! Column width resolution against a total width budget, and cell wrapping

use textwrap::{Options, WordSeparator, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

use crate::format::RenderedCell;

/// Display width of the widest line of `text`
pub fn text_width(text: &str) -> usize {
    text.split('\n')
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
}

/// Compute the content width of every displayed column.
///
/// Columns keep their natural width when the table fits in `budget`. When it
/// does not, columns narrower than an equal share of the remaining space keep
/// their width and the rest share what is left, never going below the width
/// of their header.
pub fn resolve(
    header: Option<&[RenderedCell]>,
    body: &[Vec<RenderedCell>],
    columns: usize,
    overhead: usize,
    budget: Option<usize>,
) -> Vec<usize> {
    let mut natural = vec![0; columns];
    let mut floor = vec![1; columns];

    if let Some(header) = header {
        for (i, cell) in header.iter().enumerate().take(columns) {
            let width = text_width(&cell.text);
            natural[i] = width;
            floor[i] = width.max(1);
        }
    }
    for row in body {
        for (i, cell) in row.iter().enumerate().take(columns) {
            natural[i] = natural[i].max(text_width(&cell.text));
        }
    }

    let total: usize = natural.iter().sum::<usize>() + overhead;
    let budget = match budget {
        Some(budget) if total > budget => budget,
        _ => return natural,
    };

    let mut remaining = budget.saturating_sub(overhead);
    let mut widths = natural.clone();
    let mut open: Vec<usize> = (0..columns).collect();

    loop {
        let share = remaining / open.len().max(1);
        let (fits, shrink): (Vec<usize>, Vec<usize>) = open
            .iter()
            .copied()
            .partition(|&i| natural[i] <= share || natural[i] <= floor[i]);
        if fits.is_empty() {
            break;
        }
        for i in fits {
            remaining = remaining.saturating_sub(natural[i]);
        }
        open = shrink;
        if open.is_empty() {
            break;
        }
    }

    if !open.is_empty() {
        let share = remaining / open.len();
        let extra = remaining % open.len();
        for (k, &i) in open.iter().enumerate() {
            let width = share + usize::from(k < extra);
            widths[i] = width.max(floor[i]);
        }
    }

    let resolved = widths.iter().sum::<usize>() + overhead;
    if resolved > budget {
        tracing::warn!(
            budget,
            width = resolved,
            "Table cannot be narrowed to the width budget"
        );
    } else {
        tracing::debug!(budget, width = resolved, ?widths, "Wrapped columns to fit");
    }
    widths
}

/// Break `text` into lines no wider than `width`, preferring word boundaries
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let options = Options::new(width.max(1))
        .break_words(true)
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    let mut out = Vec::new();
    for line in text.split('\n') {
        if UnicodeWidthStr::width(line) <= options.width {
            out.push(line.to_string());
            continue;
        }
        out.extend(
            textwrap::wrap(line, &options)
                .into_iter()
                .map(|cow| cow.into_owned()),
        );
    }
    out
}
