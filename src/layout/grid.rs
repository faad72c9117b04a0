//! Box-drawing assembly of formatted cells

use unicode_width::UnicodeWidthStr;

use crate::config::Alignment;
use crate::format::RenderedCell;

use super::style::{BorderStyle, Rule};
use super::width::wrap;

/// Formatted cells, resolved widths and the border style of one render
#[derive(Debug, Clone)]
pub struct Grid {
    pub header: Option<Vec<RenderedCell>>,
    pub body: Vec<Vec<RenderedCell>>,
    pub widths: Vec<usize>,
    pub style: BorderStyle,
}

impl Grid {
    /// Render the grid; lines are joined with `\n` and there is no trailing newline
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        if let Some(rule) = self.style.top {
            lines.push(self.rule_line(rule));
        }
        if let Some(header) = &self.header {
            self.push_row(header, &mut lines);
            if let Some(rule) = self.style.header {
                lines.push(self.rule_line(rule));
            }
        }
        for (i, row) in self.body.iter().enumerate() {
            if i > 0 {
                if let Some(rule) = self.style.row {
                    lines.push(self.rule_line(rule));
                }
            }
            self.push_row(row, &mut lines);
        }
        if let Some(rule) = self.style.bottom {
            lines.push(self.rule_line(rule));
        }

        lines.join("\n")
    }

    fn rule_line(&self, rule: Rule) -> String {
        let mut line = String::new();
        line.extend(rule.left);
        for (i, width) in self.widths.iter().enumerate() {
            if i > 0 {
                line.extend(rule.cross);
            }
            line.extend(std::iter::repeat(rule.fill).take(width + 2));
        }
        line.extend(rule.right);
        line
    }

    /// Emit one logical row; multi-line cells produce several physical lines
    /// and shorter cells are filled with blanks
    fn push_row(&self, cells: &[RenderedCell], lines: &mut Vec<String>) {
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, &width)| {
                if self.style.single_line {
                    vec![cell.text.clone()]
                } else {
                    wrap(&cell.text, width)
                }
            })
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(0);

        for n in 0..height {
            let mut line = String::new();
            line.extend(self.style.left);
            for (i, ((cell, parts), &width)) in
                cells.iter().zip(&wrapped).zip(&self.widths).enumerate()
            {
                if i > 0 {
                    line.extend(self.style.vertical);
                }
                let text = parts.get(n).map(String::as_str).unwrap_or("");
                line.push(' ');
                pad(&mut line, text, width, cell.alignment);
                line.push(' ');
            }
            line.extend(self.style.right);
            lines.push(line);
        }
    }
}

fn pad(line: &mut String, text: &str, width: usize, alignment: Alignment) {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    let (before, after) = match alignment {
        Alignment::Left => (0, fill),
        Alignment::Right => (fill, 0),
        Alignment::Center => (fill / 2, fill - fill / 2),
    };
    line.extend(std::iter::repeat(' ').take(before));
    line.push_str(text);
    line.extend(std::iter::repeat(' ').take(after));
}
