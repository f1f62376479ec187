//! Fixed cell-grid pipeline drawn directly with `printpdf`.
//!
//! Text is placed through a [`CellWriter`] cursor that moves like a print head. Each cell has a
//! fixed width and height, an optional border and an alignment. Pages are broken when the next
//! cell would cross the bottom margin, and every page gets the `FACTURE` header and a
//! `Page N` footer. Only the PDF base fonts are used, so no font files are required.

use std::io::BufWriter;

use log::debug;
use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

use super::metrics::{points_to_mm, text_width_mm};
use crate::content;
use crate::error::FixtureError;
use crate::invoice::Invoice;
use crate::model::{Block, HorizontalAlignment, Table, TextLevel, TextLine, TotalRow};

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 10.0;
const BOTTOM_MARGIN_MM: f64 = 20.0;
const CELL_PADDING_MM: f64 = 1.0;
const FOOTER_OFFSET_MM: f64 = 15.0;
const TABLE_WIDTH_MM: f64 = 170.0;
const AMOUNT_WIDTH_MM: f64 = 30.0;
const SPACER_UNIT_MM: f64 = 10.0;
const LAYER_NAME: &str = "Calque 1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Face {
    bold: bool,
    italic: bool,
}

impl Face {
    const REGULAR: Face = Face {
        bold: false,
        italic: false,
    };
    const BOLD: Face = Face {
        bold: true,
        italic: false,
    };
    const ITALIC: Face = Face {
        bold: false,
        italic: true,
    };
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl Fonts {
    fn load(document: &PdfDocumentReference) -> Result<Self, FixtureError> {
        let load = |font: BuiltinFont| {
            document
                .add_builtin_font(font)
                .map_err(|err| FixtureError::render("Failed to register a built-in font", err))
        };

        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            italic: load(BuiltinFont::HelveticaOblique)?,
            bold_italic: load(BuiltinFont::HelveticaBoldOblique)?,
        })
    }

    fn get(&self, face: Face) -> &IndirectFontRef {
        match (face.bold, face.italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }
}

/// Options for a single cell.
#[derive(Clone, Copy, Debug, Default)]
struct CellOptions {
    border: bool,
    /// Moves the cursor to the start of the next line after the cell.
    line_break: bool,
    align: HorizontalAlignment,
    shaded: bool,
}

/// Cursor-based writer. Positions are tracked in millimetres from the top-left corner and
/// converted to PDF coordinates (bottom-left origin) when drawing.
struct CellWriter {
    document: PdfDocumentReference,
    fonts: Fonts,
    layer: PdfLayerReference,
    page: usize,
    x: f64,
    y: f64,
    face: Face,
    font_size: u8,
}

impl CellWriter {
    fn new(title: &str) -> Result<Self, FixtureError> {
        let (document, page, layer) = PdfDocument::new(
            title,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            LAYER_NAME,
        );
        let fonts = Fonts::load(&document)?;
        let layer = document.get_page(page).get_layer(layer);

        let mut writer = Self {
            document,
            fonts,
            layer,
            page: 1,
            x: MARGIN_MM,
            y: MARGIN_MM,
            face: Face::REGULAR,
            font_size: 10,
        };
        writer.header();
        Ok(writer)
    }

    fn set_font(&mut self, face: Face, font_size: u8) {
        self.face = face;
        self.font_size = font_size;
    }

    fn header(&mut self) {
        self.set_font(Face::BOLD, 16);
        self.cell(
            0.0,
            10.0,
            content::TITLE,
            CellOptions {
                line_break: true,
                align: HorizontalAlignment::Center,
                ..CellOptions::default()
            },
        );
        self.ln(10.0);
    }

    fn footer(&mut self) {
        let (face, font_size) = (self.face, self.font_size);
        self.x = MARGIN_MM;
        self.y = PAGE_HEIGHT_MM - FOOTER_OFFSET_MM;
        self.set_font(Face::ITALIC, 8);
        let label = format!("Page {}", self.page);
        self.draw_cell(
            0.0,
            10.0,
            &label,
            CellOptions {
                align: HorizontalAlignment::Center,
                ..CellOptions::default()
            },
        );
        self.set_font(face, font_size);
    }

    fn add_page(&mut self) {
        self.footer();
        let (face, font_size) = (self.face, self.font_size);

        let (page, layer) =
            self.document
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = self.document.get_page(page).get_layer(layer);
        self.page += 1;
        self.x = MARGIN_MM;
        self.y = MARGIN_MM;
        debug!("Started page {}", self.page);

        self.header();
        self.set_font(face, font_size);
    }

    /// Moves to the start of the next line, `height` millimetres further down.
    fn ln(&mut self, height: f64) {
        self.x = MARGIN_MM;
        self.y += height;
    }

    /// Writes a cell at the cursor, breaking the page first when it would not fit. A width of
    /// zero extends the cell to the right margin.
    fn cell(&mut self, width: f64, height: f64, text: &str, options: CellOptions) {
        if self.y + height > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM {
            let x = self.x;
            self.add_page();
            self.x = x;
        }
        self.draw_cell(width, height, text, options);
    }

    fn draw_cell(&mut self, width: f64, height: f64, text: &str, options: CellOptions) {
        let width = if width <= 0.0 {
            PAGE_WIDTH_MM - MARGIN_MM - self.x
        } else {
            width
        };

        if options.shaded {
            self.layer
                .set_fill_color(Color::Greyscale(Greyscale::new(0.85, None)));
            self.layer
                .add_shape(self.rectangle(self.x, self.y, width, height, true));
            self.layer
                .set_fill_color(Color::Greyscale(Greyscale::new(0.0, None)));
        }
        if options.border {
            self.layer
                .add_shape(self.rectangle(self.x, self.y, width, height, false));
        }

        if !text.is_empty() {
            let text_width = text_width_mm(text, self.font_size, self.face.bold);
            let text_x = match options.align {
                HorizontalAlignment::Left => self.x + CELL_PADDING_MM,
                HorizontalAlignment::Center => self.x + (width - text_width) / 2.0,
                HorizontalAlignment::Right => self.x + width - CELL_PADDING_MM - text_width,
            };
            let baseline = self.y + height / 2.0 + 0.3 * points_to_mm(self.font_size);
            let font = self.fonts.get(self.face);
            self.layer.use_text(
                text,
                self.font_size.into(),
                Mm(text_x),
                Mm(PAGE_HEIGHT_MM - baseline),
                font,
            );
        }

        if options.line_break {
            self.ln(height);
        } else {
            self.x += width;
        }
    }

    fn rectangle(&self, x: f64, y: f64, width: f64, height: f64, filled: bool) -> Line {
        let top = PAGE_HEIGHT_MM - y;
        let bottom = top - height;
        let points = vec![
            (Point::new(Mm(x), Mm(top)), false),
            (Point::new(Mm(x + width), Mm(top)), false),
            (Point::new(Mm(x + width), Mm(bottom)), false),
            (Point::new(Mm(x), Mm(bottom)), false),
        ];

        Line {
            points,
            is_closed: true,
            has_fill: filled,
            has_stroke: !filled,
            is_clipping_path: false,
        }
    }

    fn finish(mut self) -> Result<Vec<u8>, FixtureError> {
        self.footer();
        let mut writer = BufWriter::new(Vec::new());
        self.document
            .save(&mut writer)
            .map_err(|err| FixtureError::render("Failed to serialize the PDF document", err))?;
        writer
            .into_inner()
            .map_err(|err| FixtureError::Io(err.into_error()))
    }
}

fn line_metrics(level: TextLevel) -> (u8, f64) {
    match level {
        TextLevel::Title => (16, 10.0),
        TextLevel::Heading => (11, 8.0),
        TextLevel::Body => (10, 6.0),
        TextLevel::Fine => (8, 4.0),
    }
}

fn write_line(writer: &mut CellWriter, line: &TextLine) {
    let (font_size, height) = line_metrics(line.level());
    let spans = line.spans();

    // Mixed-style lines are written as consecutive cells sized to their text.
    for (index, span) in spans.iter().enumerate() {
        let face = Face {
            bold: span.is_bold(),
            italic: span.is_italic(),
        };
        writer.set_font(face, font_size);
        let last = index + 1 == spans.len();
        let width = if last && spans.len() == 1 {
            0.0
        } else {
            text_width_mm(span.text(), font_size, face.bold) + 2.0 * CELL_PADDING_MM
        };
        writer.cell(
            width,
            height,
            span.text(),
            CellOptions {
                line_break: last,
                align: line.alignment(),
                ..CellOptions::default()
            },
        );
    }
}

fn column_widths(table: &Table) -> Vec<f64> {
    let total: usize = table.columns().iter().map(|column| column.weight).sum();
    table
        .columns()
        .iter()
        .map(|column| TABLE_WIDTH_MM * column.weight as f64 / total.max(1) as f64)
        .collect()
}

fn write_table(writer: &mut CellWriter, table: &Table) {
    let widths = column_widths(table);
    let last_column = widths.len().saturating_sub(1);

    writer.set_font(Face::BOLD, 10);
    for (index, (column, width)) in table.columns().iter().zip(&widths).enumerate() {
        writer.cell(
            *width,
            8.0,
            &column.title,
            CellOptions {
                border: true,
                line_break: index == last_column,
                align: HorizontalAlignment::Center,
                shaded: false,
            },
        );
    }

    writer.set_font(Face::REGULAR, 10);
    for cells in table.rows() {
        for (index, ((column, width), cell)) in
            table.columns().iter().zip(&widths).zip(cells).enumerate()
        {
            writer.cell(
                *width,
                6.0,
                cell,
                CellOptions {
                    border: true,
                    line_break: index == last_column,
                    align: column.alignment,
                    shaded: false,
                },
            );
        }
    }
}

fn write_totals(writer: &mut CellWriter, rows: &[TotalRow]) {
    let label_width = TABLE_WIDTH_MM - AMOUNT_WIDTH_MM;

    for row in rows {
        let (font_size, height) = if row.emphasized { (12, 8.0) } else { (10, 6.0) };
        writer.set_font(Face::BOLD, font_size);
        writer.cell(
            label_width,
            height,
            &row.label,
            CellOptions {
                align: HorizontalAlignment::Right,
                ..CellOptions::default()
            },
        );
        writer.cell(
            AMOUNT_WIDTH_MM,
            height,
            &row.amount,
            CellOptions {
                border: true,
                line_break: true,
                align: HorizontalAlignment::Right,
                shaded: row.emphasized,
            },
        );
    }
}

/// Renders `invoice` on a fixed cell grid with `printpdf` and returns the PDF bytes.
pub fn render(invoice: &Invoice) -> Result<Vec<u8>, FixtureError> {
    let title = format!("{} {}", content::TITLE, invoice.number());
    let mut writer = CellWriter::new(&title)?;

    let blocks = content::invoice_blocks(invoice, false);
    debug!("Writing {} blocks as printpdf cells", blocks.len());

    for block in &blocks {
        match block {
            Block::Line(line) => write_line(&mut writer, line),
            Block::Spacer(lines) => writer.ln(lines * SPACER_UNIT_MM),
            Block::Table(table) => write_table(&mut writer, table),
            Block::Totals(rows) => write_totals(&mut writer, rows),
        }
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::{column_widths, TABLE_WIDTH_MM};
    use crate::model::{Column, HorizontalAlignment, Table};

    #[test]
    fn column_widths_fill_the_table() {
        let table = Table::new(vec![
            Column::new("Description", 52, HorizontalAlignment::Left),
            Column::new("Qté", 12, HorizontalAlignment::Center),
            Column::new("Prix unitaire", 18, HorizontalAlignment::Right),
            Column::new("Total HT", 18, HorizontalAlignment::Right),
        ]);
        let widths = column_widths(&table);
        let sum: f64 = widths.iter().sum();

        assert_eq!(widths.len(), 4);
        assert!((sum - TABLE_WIDTH_MM).abs() < 1e-9);
        assert!((widths[0] - TABLE_WIDTH_MM * 0.52).abs() < 1e-9);
    }
}
