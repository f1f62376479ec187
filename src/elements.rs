//! Custom `genpdf` elements used by the flow layout.
//!
//! `genpdf` ships paragraphs and framed tables but nothing for a right-hand totals column whose
//! amounts are boxed while the labels are not, nor a plain rule under the title.

use genpdf::error::Error;
use genpdf::style::{Style, StyledString};
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

const DEFAULT_AMOUNT_WIDTH_MM: f64 = 38.0;
const DEFAULT_CELL_PADDING_MM: f64 = 1.5;
const EMPHASIS_GAP_MM: f64 = 0.6;

fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn rectangle(left: f64, top: f64, right: f64, bottom: f64) -> Vec<Position> {
    vec![
        Position::new(mm_from_f64(left), mm_from_f64(top)),
        Position::new(mm_from_f64(right), mm_from_f64(top)),
        Position::new(mm_from_f64(right), mm_from_f64(bottom)),
        Position::new(mm_from_f64(left), mm_from_f64(bottom)),
        Position::new(mm_from_f64(left), mm_from_f64(top)),
    ]
}

/// One row of the totals block: a right-aligned label followed by a framed amount.
///
/// Emphasized rows get a double frame, which is how the grand total stands out without fill
/// colors (not supported by `genpdf` areas).
pub struct AmountRow {
    label: StyledString,
    amount: StyledString,
    amount_width: Mm,
    padding: Mm,
    emphasized: bool,
}

impl AmountRow {
    /// Creates a row with the default amount column width.
    pub fn new(label: impl Into<StyledString>, amount: impl Into<StyledString>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
            amount_width: mm_from_f64(DEFAULT_AMOUNT_WIDTH_MM),
            padding: mm_from_f64(DEFAULT_CELL_PADDING_MM),
            emphasized: false,
        }
    }

    /// Marks the row as the emphasized grand total.
    pub fn with_emphasis(mut self, emphasized: bool) -> Self {
        self.emphasized = emphasized;
        self
    }
}

impl Element for AmountRow {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut label = self.label.clone();
        label.style = style.and(label.style);
        let mut amount = self.amount.clone();
        amount.style = style.and(amount.style);

        let line_height = label
            .style
            .line_height(&context.font_cache)
            .max(amount.style.line_height(&context.font_cache));
        let padding = mm_to_f64(self.padding);
        let row_height = mm_to_f64(line_height) + 2.0 * padding;

        let mut result = RenderResult::default();
        if row_height > mm_to_f64(area.size().height) {
            result.has_more = true;
            return Ok(result);
        }

        let width = mm_to_f64(area.size().width);
        let box_right = width;
        let box_left = (width - mm_to_f64(self.amount_width)).max(0.0);

        let label_x = box_left - padding - mm_to_f64(label.width(&context.font_cache));
        let amount_x = box_right - padding - mm_to_f64(amount.width(&context.font_cache));

        for (x, string) in [(label_x, &label), (amount_x, &amount)] {
            let origin = Position::new(mm_from_f64(x.max(0.0)), self.padding);
            match area.text_section(&context.font_cache, origin, style) {
                Some(mut section) => section.print_str(&string.s, string.style)?,
                None => {
                    result.has_more = true;
                    return Ok(result);
                }
            }
        }

        area.draw_line(rectangle(box_left, 0.0, box_right, row_height), Style::new());
        if self.emphasized {
            area.draw_line(
                rectangle(
                    box_left + EMPHASIS_GAP_MM,
                    EMPHASIS_GAP_MM,
                    box_right - EMPHASIS_GAP_MM,
                    row_height - EMPHASIS_GAP_MM,
                ),
                Style::new(),
            );
        }

        result.size = Size::new(area.size().width, mm_from_f64(row_height));
        Ok(result)
    }
}

/// A horizontal rule spanning the available width.
pub struct HorizontalRule {
    height: Mm,
}

impl HorizontalRule {
    /// Creates a rule occupying `height` of vertical space, drawn at its middle.
    pub fn new(height: impl Into<Mm>) -> Self {
        Self {
            height: height.into(),
        }
    }
}

impl Element for HorizontalRule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let middle = mm_from_f64(mm_to_f64(self.height) / 2.0);
        area.draw_line(
            vec![
                Position::new(0, middle),
                Position::new(area.size().width, middle),
            ],
            Style::new(),
        );

        result.size = Size::new(area.size().width, self.height);
        Ok(result)
    }
}
