//! Reads rendered fixtures back with `lopdf` to confirm that the fields a text-extraction based
//! compliance checker looks for can actually be extracted.
//!
//! `lopdf` decodes strings of the built-in Helvetica faces with the standard encoding rather than
//! WinAnsi, so accented characters come back mangled (`é` reads as `Ø`, `É` and `°` are dropped).
//! Matching is therefore limited to the ASCII fields in [`REQUIRED_FIELDS`]; the accented labels
//! are not verified.

use std::path::Path;

use lopdf::Document;

use crate::error::FixtureError;

/// Literal strings the downstream checker expects to find in every fixture. All ASCII.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "TECH SOLUTIONS SARL",
    "12345678901234",
    "FR12345678901",
    "CLIENT ENTREPRISE SAS",
    "98765432109876",
    "FAC-2024-001234",
    "1850.00",
    "370.00",
    "2220.00",
    "30 jours",
];

/// Collapses whitespace runs into single spaces and drops NUL bytes left over from two-byte
/// string encodings, so that matches do not depend on how a producer split its text operators.
pub fn normalize_text(text: &str) -> String {
    let stripped: String = text.chars().filter(|ch| *ch != '\0').collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the text of every page of the PDF held in `bytes`, normalized with
/// [`normalize_text`].
pub fn extract_text(bytes: &[u8]) -> Result<String, FixtureError> {
    let document = Document::load_mem(bytes)?;
    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    let text = document.extract_text(&pages)?;
    Ok(normalize_text(&text))
}

/// Extracts the text of the PDF stored at `path`.
pub fn extract_text_from_file(path: impl AsRef<Path>) -> Result<String, FixtureError> {
    let bytes = std::fs::read(path)?;
    extract_text(&bytes)
}

/// Returns the required fields that do not occur in `text`.
pub fn missing_fields(text: &str) -> Vec<&'static str> {
    let text = normalize_text(text);
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !text.contains(field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{missing_fields, normalize_text, REQUIRED_FIELDS};

    #[test]
    fn normalization_collapses_operator_splits() {
        assert_eq!(
            normalize_text("TECH \n SOLUTIONS  SARL\n"),
            "TECH SOLUTIONS SARL"
        );
        assert_eq!(normalize_text("\0F\0A\0C"), "FAC");
    }

    #[test]
    fn required_fields_survive_any_single_byte_decoding() {
        assert!(REQUIRED_FIELDS.iter().all(|field| field.is_ascii()));
    }

    #[test]
    fn reports_only_absent_fields() {
        let text = REQUIRED_FIELDS[..9].join("\n");
        assert_eq!(missing_fields(&text), vec!["30 jours"]);
        assert!(missing_fields(&REQUIRED_FIELDS.join(" ")).is_empty());
    }
}
