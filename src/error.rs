//! Error type shared by the renderers, the runners and the PDF inspection helpers.

use std::fmt;
use std::io;

/// Errors that can occur while generating or inspecting an invoice fixture.
#[derive(Debug)]
pub enum FixtureError {
    /// No usable font family could be loaded for the flow layout.
    FontLoad(genpdf::error::Error),
    /// `genpdf` or `printpdf` rejected the document while laying it out or serializing it.
    Render(genpdf::error::Error),
    /// The fixture could not be written to or read back from disk.
    Io(io::Error),
    /// The rendered bytes could not be parsed back for text extraction.
    Inspect(lopdf::Error),
}

impl FixtureError {
    /// Wraps a `printpdf` failure (or anything convertible into a `genpdf` error kind) with a
    /// short description of the step that failed.
    pub(crate) fn render(
        message: impl Into<String>,
        source: impl Into<genpdf::error::ErrorKind>,
    ) -> Self {
        Self::Render(genpdf::error::Error::new(message, source))
    }
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontLoad(err) => write!(f, "Failed to load fonts for the invoice layout: {err}"),
            Self::Render(err) => write!(f, "Failed to render the invoice document: {err}"),
            Self::Io(err) => write!(f, "Failed to access the invoice fixture file: {err}"),
            Self::Inspect(err) => write!(f, "Failed to parse the rendered PDF: {err}"),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FontLoad(err) | Self::Render(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Inspect(err) => Some(err),
        }
    }
}

impl From<genpdf::error::Error> for FixtureError {
    fn from(err: genpdf::error::Error) -> Self {
        Self::Render(err)
    }
}

impl From<io::Error> for FixtureError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<lopdf::Error> for FixtureError {
    fn from(err: lopdf::Error) -> Self {
        Self::Inspect(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::FixtureError;

    #[test]
    fn io_errors_keep_their_source() {
        let err = FixtureError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(err.to_string().contains("denied"));
        assert!(err.source().is_some());
    }
}
