use crate::error::FixtureError;
use crate::render::{GeneratedFixture, Variant};

use super::Generator;

/// Renders the flow-layout invoice to `facture_clean_invoicecomply.pdf` in the working directory.
///
/// The layout needs a TrueType family for its metrics. See [`crate::fonts`] for the search order
/// and the environment variables that influence it.
pub fn run() -> Result<GeneratedFixture, FixtureError> {
    Generator::new().run(Variant::Flow)
}
