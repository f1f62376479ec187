use crate::error::FixtureError;
use crate::render::{GeneratedFixture, Variant};

use super::Generator;

/// Renders the cell-grid invoice to `facture_test_invoicecomply.pdf` in the working directory.
pub fn run() -> Result<GeneratedFixture, FixtureError> {
    Generator::new().run(Variant::Cells)
}
