//! Styled text fragments shared by both rendering pipelines.
//!
//! A [`Span`] only carries the inline decorations the invoice needs (bold and italic). The flow
//! pipeline turns spans into [`genpdf`] styled strings, while the cell pipeline maps the same
//! flags onto the matching built-in Helvetica face.

use genpdf::style::{Style, StyledString};

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Sets the bold flag and returns the updated span.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Sets the italic flag and returns the updated span.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Convenience shorthand that marks the span as bold.
    pub fn bold(self) -> Self {
        self.with_bold(true)
    }

    /// Convenience shorthand that marks the span as italic.
    pub fn italic(self) -> Self {
        self.with_italic(true)
    }

    fn to_style(&self) -> Style {
        let mut style = Style::new();
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }

    /// Converts the span to a [`StyledString`] for `genpdf` paragraphs.
    pub fn to_styled_string(&self) -> StyledString {
        StyledString::new(self.text.clone(), self.to_style())
    }
}

impl From<Span> for StyledString {
    fn from(span: Span) -> Self {
        span.to_styled_string()
    }
}

/// Concatenates the raw text of `spans`, dropping all styling.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

#[cfg(test)]
mod tests {
    use genpdf::style::StyledString;

    use super::{plain_text, Span};

    #[test]
    fn styled_string_keeps_text_and_flags() {
        let styled = StyledString::from(Span::new("TOTAL TTC:").bold());
        assert_eq!(styled.s, "TOTAL TTC:");
        assert!(styled.style.is_bold());
        assert!(!styled.style.is_italic());
    }

    #[test]
    fn plain_text_joins_spans() {
        let spans = vec![
            Span::new("Conditions de paiement:").bold(),
            Span::new(" 30 jours"),
        ];
        assert_eq!(plain_text(&spans), "Conditions de paiement: 30 jours");
    }
}
