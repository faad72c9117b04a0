//! Glyph tables for each border style

use crate::config::TableFormatting;

/// A horizontal rule: optional end caps and column crossings around a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub left: Option<char>,
    pub fill: char,
    pub cross: Option<char>,
    pub right: Option<char>,
}

const fn rule(left: Option<char>, fill: char, cross: Option<char>, right: Option<char>) -> Rule {
    Rule {
        left,
        fill,
        cross,
        right,
    }
}

/// Glyphs consumed by the grid layout engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderStyle {
    pub left: Option<char>,
    pub right: Option<char>,
    /// Separator between adjacent cells
    pub vertical: Option<char>,
    pub top: Option<Rule>,
    /// Rule between the header and the body
    pub header: Option<Rule>,
    /// Rule between consecutive body rows
    pub row: Option<Rule>,
    pub bottom: Option<Rule>,
    /// Cells are never wrapped over several lines
    pub single_line: bool,
}

const NONE: BorderStyle = BorderStyle {
    left: None,
    right: None,
    vertical: None,
    top: None,
    header: None,
    row: None,
    bottom: None,
    single_line: false,
};

const UTF8_FULL: BorderStyle = BorderStyle {
    left: Some('│'),
    right: Some('│'),
    vertical: Some('┆'),
    top: Some(rule(Some('┌'), '─', Some('┬'), Some('┐'))),
    header: Some(rule(Some('╞'), '═', Some('╪'), Some('╡'))),
    row: Some(rule(Some('├'), '╌', Some('┼'), Some('┤'))),
    bottom: Some(rule(Some('└'), '─', Some('┴'), Some('┘'))),
    single_line: false,
};

const ASCII_FULL: BorderStyle = BorderStyle {
    left: Some('|'),
    right: Some('|'),
    vertical: Some('|'),
    top: Some(rule(Some('+'), '-', Some('+'), Some('+'))),
    header: Some(rule(Some('+'), '=', Some('+'), Some('+'))),
    row: Some(rule(Some('+'), '-', Some('+'), Some('+'))),
    bottom: Some(rule(Some('+'), '-', Some('+'), Some('+'))),
    single_line: false,
};

const ASCII_MARKDOWN: BorderStyle = BorderStyle {
    left: Some('|'),
    right: Some('|'),
    vertical: Some('|'),
    header: Some(rule(Some('|'), '-', Some('|'), Some('|'))),
    single_line: true,
    ..NONE
};

impl BorderStyle {
    /// Glyph table for a formatting choice
    pub fn for_formatting(formatting: TableFormatting, rounded: bool) -> BorderStyle {
        let style = match formatting {
            TableFormatting::Utf8Full => UTF8_FULL,
            TableFormatting::Utf8FullCondensed => BorderStyle {
                row: None,
                ..UTF8_FULL
            },
            TableFormatting::Utf8NoBorders => BorderStyle {
                vertical: Some('┆'),
                header: Some(rule(None, '═', Some('╪'), None)),
                ..NONE
            },
            TableFormatting::Utf8BordersOnly => BorderStyle {
                left: Some('│'),
                right: Some('│'),
                top: Some(rule(Some('┌'), '─', None, Some('┐'))),
                header: Some(rule(Some('╞'), '═', None, Some('╡'))),
                bottom: Some(rule(Some('└'), '─', None, Some('┘'))),
                ..NONE
            },
            TableFormatting::Utf8HorizontalOnly => BorderStyle {
                top: Some(rule(None, '─', None, None)),
                header: Some(rule(None, '═', None, None)),
                row: Some(rule(None, '─', None, None)),
                bottom: Some(rule(None, '─', None, None)),
                ..NONE
            },
            TableFormatting::AsciiFull => ASCII_FULL,
            TableFormatting::AsciiFullCondensed => BorderStyle {
                row: None,
                ..ASCII_FULL
            },
            TableFormatting::AsciiNoBorders => BorderStyle {
                vertical: Some('|'),
                header: Some(rule(None, '=', Some('+'), None)),
                ..NONE
            },
            TableFormatting::AsciiBordersOnly => BorderStyle {
                left: Some('|'),
                right: Some('|'),
                top: Some(rule(Some('+'), '-', None, Some('+'))),
                header: Some(rule(Some('+'), '=', None, Some('+'))),
                bottom: Some(rule(Some('+'), '-', None, Some('+'))),
                ..NONE
            },
            TableFormatting::AsciiBordersOnlyCondensed => BorderStyle {
                left: Some('|'),
                right: Some('|'),
                top: Some(rule(Some('+'), '-', None, Some('+'))),
                bottom: Some(rule(Some('+'), '-', None, Some('+'))),
                ..NONE
            },
            TableFormatting::AsciiHorizontalOnly => BorderStyle {
                top: Some(rule(None, '-', None, None)),
                header: Some(rule(None, '=', None, None)),
                row: Some(rule(None, '-', None, None)),
                bottom: Some(rule(None, '-', None, None)),
                ..NONE
            },
            TableFormatting::AsciiMarkdown | TableFormatting::Markdown => ASCII_MARKDOWN,
            TableFormatting::Nothing => NONE,
        };

        if rounded {
            style.with_rounded_corners()
        } else {
            style
        }
    }

    fn with_rounded_corners(mut self) -> BorderStyle {
        let round = |c: Option<char>| match c {
            Some('┌') => Some('╭'),
            Some('┐') => Some('╮'),
            Some('└') => Some('╰'),
            Some('┘') => Some('╯'),
            other => other,
        };
        if let Some(top) = self.top.as_mut() {
            top.left = round(top.left);
            top.right = round(top.right);
        }
        if let Some(bottom) = self.bottom.as_mut() {
            bottom.left = round(bottom.left);
            bottom.right = round(bottom.right);
        }
        self
    }

    /// Characters used by borders, separators and padding for `columns` columns
    pub fn overhead(&self, columns: usize) -> usize {
        let separators = match self.vertical {
            Some(_) => columns.saturating_sub(1),
            None => 0,
        };
        columns * 2 + separators + self.left.map_or(0, |_| 1) + self.right.map_or(0, |_| 1)
    }
}
