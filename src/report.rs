//! French console recap printed after a fixture has been written.

use std::fmt;

use log::warn;

use crate::inspect;
use crate::invoice::{format_amount, format_date, format_rate, Invoice};
use crate::render::GeneratedFixture;

/// Closing line of a summary whose fixture passed (or skipped) the extraction check.
pub const CONFIRMATION: &str = "Cette facture devrait être parfaitement lisible par pdf-parse!";

/// Closing line of a summary whose fixture failed the extraction check.
pub const EXTRACTION_WARNING: &str =
    "Attention: cette facture risque de ne pas être lisible par pdf-parse.";

/// Outcome of reading the written fixture back with a text extractor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractionCheck {
    /// Every required field was found.
    Complete,
    /// Some required fields could not be extracted.
    Missing(Vec<&'static str>),
    /// The file could not be read or parsed.
    Unreadable(String),
}

impl ExtractionCheck {
    /// Reads the fixture back and checks the required fields. Failures are logged, never raised.
    pub fn run(fixture: &GeneratedFixture) -> Self {
        match inspect::extract_text_from_file(&fixture.path) {
            Ok(text) => {
                let missing = inspect::missing_fields(&text);
                if missing.is_empty() {
                    ExtractionCheck::Complete
                } else {
                    warn!(
                        "{} is missing extractable fields: {}",
                        fixture.path.display(),
                        missing.join(", ")
                    );
                    ExtractionCheck::Missing(missing)
                }
            }
            Err(err) => {
                warn!("Could not read back {}: {}", fixture.path.display(), err);
                ExtractionCheck::Unreadable(err.to_string())
            }
        }
    }

    /// Line that ends the summary for this outcome.
    pub fn closing_line(&self) -> &'static str {
        match self {
            ExtractionCheck::Complete => CONFIRMATION,
            ExtractionCheck::Missing(_) | ExtractionCheck::Unreadable(_) => EXTRACTION_WARNING,
        }
    }
}

impl fmt::Display for ExtractionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionCheck::Complete => {
                f.write_str("Vérification: tous les champs requis sont extractibles.")
            }
            ExtractionCheck::Missing(fields) => {
                write!(f, "Vérification: champs non extractibles: {}", fields.join(", "))
            }
            ExtractionCheck::Unreadable(reason) => {
                write!(f, "Vérification impossible: {}", reason)
            }
        }
    }
}

/// Recap of a generated fixture. Rendered through [`fmt::Display`].
pub struct Summary<'a> {
    invoice: &'a Invoice,
    fixture: &'a GeneratedFixture,
    check: Option<ExtractionCheck>,
}

impl<'a> Summary<'a> {
    pub fn new(invoice: &'a Invoice, fixture: &'a GeneratedFixture) -> Self {
        Self {
            invoice,
            fixture,
            check: None,
        }
    }

    /// Attaches the result of reading the fixture back.
    pub fn with_extraction_check(mut self, check: ExtractionCheck) -> Self {
        self.check = Some(check);
        self
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = self.invoice;
        let issuer = invoice.issuer();
        let client = invoice.client();
        let totals = invoice.totals();

        writeln!(f, "Facture générée: {}", self.fixture.file_name())?;
        writeln!(f, "Taille du fichier: {} bytes", self.fixture.size)?;
        writeln!(f)?;
        writeln!(f, "Contenu de la facture:")?;
        writeln!(f, "- Émetteur: {}", issuer.name())?;
        writeln!(f, "- SIRET émetteur: {}", issuer.siret())?;
        if let Some(vat) = issuer.vat_number() {
            writeln!(f, "- TVA émetteur: {}", vat)?;
        }
        writeln!(f, "- Client: {}", client.name())?;
        writeln!(f, "- SIRET client: {}", client.siret())?;
        writeln!(f, "- Numéro: {}", invoice.number())?;
        writeln!(f, "- Date: {}", format_date(invoice.issue_date()))?;
        writeln!(f, "- Échéance: {}", format_date(invoice.due_date()))?;
        writeln!(f, "- Total HT: {}", format_amount(totals.subtotal))?;
        writeln!(
            f,
            "- TVA {}: {}",
            format_rate(invoice.tax_rate()),
            format_amount(totals.tax)
        )?;
        writeln!(f, "- Total TTC: {}", format_amount(totals.grand_total))?;
        writeln!(f, "- Conditions: {}", invoice.payment_terms())?;
        writeln!(f)?;
        match &self.check {
            None => f.write_str(CONFIRMATION),
            Some(check) => {
                writeln!(f, "{}", check)?;
                f.write_str(check.closing_line())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::{ExtractionCheck, Summary, CONFIRMATION, EXTRACTION_WARNING};
    use crate::invoice::Invoice;
    use crate::render::{GeneratedFixture, Variant};

    fn fixture() -> GeneratedFixture {
        GeneratedFixture {
            variant: Variant::Cells,
            path: PathBuf::from("out").join(Variant::Cells.file_name()),
            size: 2048,
        }
    }

    #[test]
    fn summary_restates_every_field_and_ends_with_confirmation() {
        let invoice = Invoice::sample(NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"));
        let fixture = fixture();
        let text = Summary::new(&invoice, &fixture).to_string();

        for expected in [
            "Facture générée: facture_test_invoicecomply.pdf",
            "Taille du fichier: 2048 bytes",
            "- Émetteur: TECH SOLUTIONS SARL",
            "- SIRET émetteur: 12345678901234",
            "- TVA émetteur: FR12345678901",
            "- Client: CLIENT ENTREPRISE SAS",
            "- SIRET client: 98765432109876",
            "- Numéro: FAC-2024-001234",
            "- Date: 15/01/2024",
            "- Échéance: 14/02/2024",
            "- Total HT: 1850.00 EUR",
            "- TVA 20%: 370.00 EUR",
            "- Total TTC: 2220.00 EUR",
            "- Conditions: 30 jours",
        ] {
            assert!(text.contains(expected), "missing {expected:?} in:\n{text}");
        }
        assert!(text.ends_with(CONFIRMATION));
    }

    #[test]
    fn missing_fields_replace_the_confirmation_with_a_warning() {
        let invoice = Invoice::sample(NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"));
        let fixture = fixture();
        let text = Summary::new(&invoice, &fixture)
            .with_extraction_check(ExtractionCheck::Missing(vec!["30 jours"]))
            .to_string();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[lines.len() - 2],
            "Vérification: champs non extractibles: 30 jours"
        );
        assert_eq!(lines[lines.len() - 1], EXTRACTION_WARNING);
        assert!(!text.contains(CONFIRMATION));
    }

    #[test]
    fn complete_check_keeps_the_confirmation() {
        let invoice = Invoice::sample(NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"));
        let fixture = fixture();
        let text = Summary::new(&invoice, &fixture)
            .with_extraction_check(ExtractionCheck::Complete)
            .to_string();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[lines.len() - 2],
            "Vérification: tous les champs requis sont extractibles."
        );
        assert_eq!(lines[lines.len() - 1], CONFIRMATION);
    }

    #[test]
    fn unreadable_check_ends_with_the_warning() {
        let check = ExtractionCheck::Unreadable("fichier absent".to_owned());
        assert_eq!(check.closing_line(), EXTRACTION_WARNING);
    }

    #[test]
    fn unreadable_fixture_is_reported_not_raised() {
        let mut fixture = fixture();
        fixture.path = PathBuf::from("/__facture_missing__/nothing.pdf");
        assert!(matches!(
            ExtractionCheck::run(&fixture),
            ExtractionCheck::Unreadable(_)
        ));
    }
}
