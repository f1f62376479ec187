//! Renderer-agnostic description of the invoice document.
//!
//! The content builder emits a flat list of [`Block`] values and both pipelines walk that list
//! in order. Keeping the text here, rather than inside each renderer, guarantees that the two
//! fixtures carry identical wording.

use crate::richtext::Span;

/// Horizontal placement of a line or a table cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Visual weight of a text line. Renderers pick their own font sizes for each level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextLevel {
    /// Document title.
    Title,
    /// Block heading such as the issuer name or `FACTURÉ À:`.
    Heading,
    /// Regular body text.
    #[default]
    Body,
    /// Small print for the legal notices.
    Fine,
}

/// A single line of styled text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLine {
    spans: Vec<Span>,
    level: TextLevel,
    alignment: HorizontalAlignment,
}

impl TextLine {
    /// Creates a left-aligned body line from the provided spans.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
            ..Self::default()
        }
    }

    /// Shorthand for a line made of one unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Span::new(text)])
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn level(&self) -> TextLevel {
        self.level
    }

    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Sets the text level and returns the updated line.
    pub fn with_level(mut self, level: TextLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the alignment and returns the updated line.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Returns the unstyled text of the line.
    pub fn text(&self) -> String {
        crate::richtext::plain_text(&self.spans)
    }
}

/// A column of the line-item table.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Header label.
    pub title: String,
    /// Relative width, in hundredths of the table width.
    pub weight: usize,
    /// Alignment of body cells; header cells are always centered.
    pub alignment: HorizontalAlignment,
}

impl Column {
    pub fn new(title: impl Into<String>, weight: usize, alignment: HorizontalAlignment) -> Self {
        Self {
            title: title.into(),
            weight,
            alignment,
        }
    }
}

/// Bordered table with a header row followed by body rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a body row. Missing cells render empty, surplus cells are ignored.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .map(Into::into)
            .take(self.columns.len())
            .collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// Label and framed amount of the totals block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TotalRow {
    pub label: String,
    pub amount: String,
    /// Marks the grand total, rendered larger and shaded.
    pub emphasized: bool,
}

impl TotalRow {
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(mut self) -> Self {
        self.emphasized = true;
        self
    }
}

/// Individual content blocks, in reading order.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// A line of text.
    Line(TextLine),
    /// Vertical gap, measured in body text lines.
    Spacer(f64),
    /// The line-item table.
    Table(Table),
    /// Right-aligned totals with framed amounts.
    Totals(Vec<TotalRow>),
}

impl Block {
    /// Convenience helper for a body line.
    pub fn line(spans: impl Into<Vec<Span>>) -> Self {
        Self::Line(TextLine::new(spans))
    }

    /// Convenience helper for an unstyled body line.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Line(TextLine::plain(text))
    }

    pub fn spacer(lines: f64) -> Self {
        Self::Spacer(lines)
    }

    /// Every piece of text the block renders, in reading order.
    pub fn texts(&self) -> Vec<String> {
        match self {
            Self::Line(line) => vec![line.text()],
            Self::Spacer(_) => Vec::new(),
            Self::Table(table) => table
                .columns()
                .iter()
                .map(|column| column.title.clone())
                .chain(table.rows().iter().flatten().cloned())
                .collect(),
            Self::Totals(rows) => rows
                .iter()
                .flat_map(|row| [row.label.clone(), row.amount.clone()])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, Column, HorizontalAlignment, Table, TotalRow};

    #[test]
    fn table_rows_are_padded_to_the_column_count() {
        let table = Table::new(vec![
            Column::new("A", 50, HorizontalAlignment::Left),
            Column::new("B", 50, HorizontalAlignment::Right),
        ])
        .with_row(["only"])
        .with_row(["x", "y", "dropped"]);

        assert_eq!(table.rows()[0], vec!["only".to_owned(), String::new()]);
        assert_eq!(table.rows()[1], vec!["x".to_owned(), "y".to_owned()]);
    }

    #[test]
    fn block_texts_cover_labels_and_amounts() {
        let block = Block::Totals(vec![
            TotalRow::new("Sous-total HT:", "1850.00 EUR"),
            TotalRow::new("TOTAL TTC:", "2220.00 EUR").emphasized(),
        ]);
        assert_eq!(
            block.texts(),
            vec!["Sous-total HT:", "1850.00 EUR", "TOTAL TTC:", "2220.00 EUR"]
        );
        assert!(Block::spacer(1.0).texts().is_empty());
    }
}
