//! The two interchangeable rendering pipelines and the fixture writer.

pub mod cells;
pub mod flow;
pub mod metrics;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::FixtureError;
use crate::invoice::Invoice;

/// Selects the pipeline used to lay out the invoice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Flowing layout on `genpdf`, written to `facture_clean_invoicecomply.pdf`.
    Flow,
    /// Fixed cell grid on `printpdf`, written to `facture_test_invoicecomply.pdf`.
    Cells,
}

impl Variant {
    /// Every variant, in the order `run_all` renders them.
    pub const ALL: [Variant; 2] = [Variant::Flow, Variant::Cells];

    /// Fixed output file name of the variant.
    pub fn file_name(self) -> &'static str {
        match self {
            Variant::Flow => "facture_clean_invoicecomply.pdf",
            Variant::Cells => "facture_test_invoicecomply.pdf",
        }
    }

    /// Short French description printed by the runners.
    pub fn description(self) -> &'static str {
        match self {
            Variant::Flow => "mise en page fluide (genpdf)",
            Variant::Cells => "grille de cellules (printpdf)",
        }
    }

    /// Renders `invoice` into PDF bytes without touching the filesystem.
    pub fn render(self, invoice: &Invoice) -> Result<Vec<u8>, FixtureError> {
        match self {
            Variant::Flow => flow::render(invoice),
            Variant::Cells => cells::render(invoice),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Flow => f.write_str("flow"),
            Variant::Cells => f.write_str("cells"),
        }
    }
}

/// A fixture written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFixture {
    pub variant: Variant,
    pub path: PathBuf,
    /// File size in bytes, as reported by the filesystem after writing.
    pub size: u64,
}

impl GeneratedFixture {
    /// File name component of the written path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Renders `invoice` with `variant` and writes it to the variant's file name inside `directory`,
/// replacing any previous file.
pub fn write_fixture(
    variant: Variant,
    invoice: &Invoice,
    directory: &Path,
) -> Result<GeneratedFixture, FixtureError> {
    let bytes = variant.render(invoice)?;
    let path = directory.join(variant.file_name());
    fs::write(&path, &bytes)?;
    let size = fs::metadata(&path)?.len();

    info!(
        "Wrote {} invoice fixture to {} ({} bytes)",
        variant,
        path.display(),
        size
    );

    Ok(GeneratedFixture {
        variant,
        path,
        size,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Variant;

    #[test]
    fn variants_write_distinct_pdf_files() {
        let names: HashSet<_> = Variant::ALL.iter().map(|variant| variant.file_name()).collect();
        assert_eq!(names.len(), Variant::ALL.len());
        assert!(names.iter().all(|name| name.ends_with(".pdf")));
    }
}
