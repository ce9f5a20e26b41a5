//! Chemical formula interpretation: parse a molecular formula such as
//! `Ca(OH)2` into its elemental composition and molar mass.

pub mod batch;
pub mod common;
pub mod composition;
pub mod domain;
pub mod parser;
pub mod serialization;

pub use common::pertab::ElementSymbol;
pub use domain::{
    CompositionEntry, CompositionResult, ElementCount, ErrorCategory, FormulaError, FormulaResult,
    MolmassError, MolmassResult,
};
pub use parser::parse_formula;
