//! French invoice PDF fixtures for text-extraction based compliance checkers.
//!
//! The same sample invoice is rendered by two pipelines: a flowing `genpdf` layout
//! ([`render::Variant::Flow`]) and a fixed cell grid drawn with `printpdf`
//! ([`render::Variant::Cells`]).

pub mod builder;
pub mod content;
pub mod elements;
pub mod error;
pub mod fixtures;
pub mod fonts;
pub mod inspect;
pub mod invoice;
pub mod model;
pub mod render;
pub mod report;
pub mod richtext;

pub use error::FixtureError;
pub use invoice::Invoice;
pub use render::{write_fixture, GeneratedFixture, Variant};
