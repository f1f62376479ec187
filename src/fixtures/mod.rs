//! Runners behind the `facture_clean`, `facture_test` and `facture_cli` binaries.

pub mod cells;
pub mod flow;
pub mod run_all;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::FixtureError;
use crate::invoice::Invoice;
use crate::render::{self, GeneratedFixture, Variant};
use crate::report::{ExtractionCheck, Summary};

pub use cells::run as run_cells;
pub use flow::run as run_flow;
pub use run_all::run as run_all_variants;

/// Run configuration shared by every runner.
///
/// Defaults write into the working directory and date the invoice today.
#[derive(Clone, Debug)]
pub struct Generator {
    output_dir: PathBuf,
    issue_date: Option<NaiveDate>,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            issue_date: None,
        }
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory fixtures are written to.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Pins the issue date instead of using the current local date.
    pub fn with_issue_date(mut self, issue_date: impl Into<Option<NaiveDate>>) -> Self {
        self.issue_date = issue_date.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Builds the sample invoice for this run.
    pub fn invoice(&self) -> Invoice {
        match self.issue_date {
            Some(date) => Invoice::sample(date),
            None => Invoice::sample_today(),
        }
    }

    /// Writes the fixture for `variant` without printing anything. The output directory is
    /// created when missing.
    pub fn generate(&self, variant: Variant) -> Result<GeneratedFixture, FixtureError> {
        self.write(variant, &self.invoice())
    }

    fn write(&self, variant: Variant, invoice: &Invoice) -> Result<GeneratedFixture, FixtureError> {
        fs::create_dir_all(&self.output_dir)?;
        render::write_fixture(variant, invoice, &self.output_dir)
    }

    /// Writes the fixture for `variant` and prints the French summary to stdout.
    pub fn run(&self, variant: Variant) -> Result<GeneratedFixture, FixtureError> {
        println!(
            "Génération d'une facture française ({})...",
            variant.description()
        );

        let invoice = self.invoice();
        let fixture = self.write(variant, &invoice)?;
        let check = ExtractionCheck::run(&fixture);

        println!(
            "{}",
            Summary::new(&invoice, &fixture).with_extraction_check(check)
        );
        Ok(fixture)
    }
}
