//! Flowing layout pipeline built on `genpdf`.
//!
//! Blocks are pushed in order and `genpdf` breaks pages on its own, the same way a story of
//! flowables is laid out. Tables use frame decorators, totals use [`AmountRow`].

use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Element, Margins, PaperSize};
use log::debug;

use crate::builder::DocumentBuilder;
use crate::content;
use crate::elements::{AmountRow, HorizontalRule};
use crate::error::FixtureError;
use crate::invoice::Invoice;
use crate::model::{Block, HorizontalAlignment, Table, TextLevel, TextLine, TotalRow};
use crate::richtext::Span;

const BODY_FONT_SIZE: u8 = 10;
const FOOTER_HEIGHT_MM: i32 = 8;

fn alignment(alignment: HorizontalAlignment) -> Alignment {
    match alignment {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
        HorizontalAlignment::Right => Alignment::Right,
    }
}

fn level_style(level: TextLevel) -> Style {
    match level {
        TextLevel::Title => Style::new().bold().with_font_size(20),
        TextLevel::Heading => Style::new().with_font_size(14),
        TextLevel::Body => Style::new().with_font_size(BODY_FONT_SIZE),
        TextLevel::Fine => Style::new().with_font_size(8),
    }
}

fn paragraph<'a, I>(spans: I, align: HorizontalAlignment) -> Paragraph
where
    I: IntoIterator<Item = &'a Span>,
{
    let mut paragraph = Paragraph::default();
    for span in spans {
        paragraph.push(span.to_styled_string());
    }
    paragraph.aligned(alignment(align))
}

fn push_line(document: &mut genpdf::Document, line: &TextLine) {
    let element = paragraph(line.spans(), line.alignment()).styled(level_style(line.level()));
    document.push(element);

    if line.level() == TextLevel::Title {
        document.push(HorizontalRule::new(4));
    }
}

fn item_table(table: &Table) -> Result<TableLayout, FixtureError> {
    let weights = table.columns().iter().map(|column| column.weight).collect();
    let mut layout = TableLayout::new(weights);
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let header_style = Style::new().bold().with_font_size(BODY_FONT_SIZE);
    table
        .columns()
        .iter()
        .fold(layout.row(), |row, column| {
            let title = Span::new(column.title.as_str()).bold();
            row.element(
                paragraph([&title], HorizontalAlignment::Center)
                    .styled(header_style)
                    .padded(1),
            )
        })
        .push()?;

    let body_style = Style::new().with_font_size(9);
    for cells in table.rows() {
        table
            .columns()
            .iter()
            .zip(cells)
            .fold(layout.row(), |row, (column, cell)| {
                let span = Span::new(cell.as_str());
                row.element(
                    paragraph([&span], column.alignment)
                        .styled(body_style)
                        .padded(1),
                )
            })
            .push()?;
    }

    Ok(layout)
}

fn push_totals(document: &mut genpdf::Document, rows: &[TotalRow]) {
    for row in rows {
        let (style, label, amount) = if row.emphasized {
            (
                Style::new().with_font_size(12),
                Span::new(row.label.as_str()).bold(),
                Span::new(row.amount.as_str()).bold(),
            )
        } else {
            (
                Style::new().with_font_size(BODY_FONT_SIZE),
                Span::new(row.label.as_str()),
                Span::new(row.amount.as_str()),
            )
        };

        document.push(
            AmountRow::new(label, amount)
                .with_emphasis(row.emphasized)
                .styled(style),
        );
    }
}

/// Renders `invoice` through the flowing `genpdf` layout and returns the PDF bytes.
pub fn render(invoice: &Invoice) -> Result<Vec<u8>, FixtureError> {
    let number = invoice.number().to_owned();
    let mut document = DocumentBuilder::new()
        .with_title(format!("{} {}", content::TITLE, invoice.number()))
        .with_paper_size(PaperSize::A4)
        .with_margins(Margins::trbl(15, 18, 12, 18))
        .with_font_size(BODY_FONT_SIZE)
        .with_line_spacing(1.25)
        .with_footer(FOOTER_HEIGHT_MM, move |page| {
            Paragraph::new(format!("{} - page {}", number, page))
                .aligned(Alignment::Center)
                .styled(Style::new().italic().with_font_size(8))
        })
        .build()?;

    let blocks = content::invoice_blocks(invoice, true);
    debug!("Laying out {} blocks with genpdf", blocks.len());

    for block in &blocks {
        match block {
            Block::Line(line) => push_line(&mut document, line),
            Block::Spacer(lines) => document.push(Break::new(*lines)),
            Block::Table(table) => document.push(item_table(table)?),
            Block::Totals(rows) => push_totals(&mut document, rows),
        }
    }

    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(bytes)
}
