use crate::error::FixtureError;
use crate::render::{GeneratedFixture, Variant};

use super::Generator;

/// Renders every variant into the generator's output directory.
pub fn run(generator: &Generator) -> Result<Vec<GeneratedFixture>, FixtureError> {
    let mut fixtures = Vec::with_capacity(Variant::ALL.len());
    for variant in Variant::ALL {
        fixtures.push(generator.run(variant)?);
        println!();
    }

    println!("Toutes les factures ont été générées.");
    Ok(fixtures)
}
