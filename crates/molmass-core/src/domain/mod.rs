pub mod errors;

pub use errors::{
    ErrorCategory, ExitMapping, FormulaError, FormulaResult, MolmassError, MolmassResult,
};

use crate::common::constants::PERCENT_SCALE;
use crate::common::pertab::ElementSymbol;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementCount {
    pub symbol: ElementSymbol,
    pub count: u64,
}

impl ElementCount {
    pub fn new(symbol: ElementSymbol, count: u64) -> Self {
        Self { symbol, count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionEntry {
    pub symbol: ElementSymbol,
    pub count: u64,
    pub atomic_weight: f64,
    pub total_mass: f64,
    pub percentage: f64,
}

/// Elemental breakdown of one formula.
///
/// `elements` is ordered by mass percentage, largest first, with ties broken
/// alphabetically by symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionResult {
    pub molecular_weight: f64,
    pub formula: String,
    pub elements: Vec<CompositionEntry>,
}

impl CompositionResult {
    pub fn entry(&self, symbol: &str) -> Option<&CompositionEntry> {
        self.elements.iter().find(|entry| entry.symbol == symbol)
    }

    pub fn mass_fraction(&self, symbol: &str) -> Option<f64> {
        self.entry(symbol).map(|entry| entry.percentage / PERCENT_SCALE)
    }

    pub fn atom_count(&self) -> u64 {
        self.elements.iter().map(|entry| entry.count).sum()
    }

    pub fn percentage_total(&self) -> f64 {
        self.elements.iter().map(|entry| entry.percentage).sum()
    }

    /// Counts per element in alphabetical symbol order.
    pub fn element_counts(&self) -> Vec<ElementCount> {
        let mut counts: Vec<ElementCount> = self
            .elements
            .iter()
            .map(|entry| ElementCount::new(entry.symbol, entry.count))
            .collect();
        counts.sort_by_key(|count| count.symbol);
        counts
    }

    /// Molecular formula in Hill system order.
    ///
    /// Carbon comes first, then hydrogen, then every other element
    /// alphabetically. Without carbon all elements, hydrogen included, are
    /// alphabetical. A count of one is omitted.
    pub fn hill_formula(&self) -> String {
        let mut counts: BTreeMap<&'static str, u64> = self
            .elements
            .iter()
            .map(|entry| (entry.symbol.as_str(), entry.count))
            .collect();

        let mut formula = String::new();
        if let Some(carbon) = counts.remove("C") {
            append_element(&mut formula, "C", carbon);
            if let Some(hydrogen) = counts.remove("H") {
                append_element(&mut formula, "H", hydrogen);
            }
        }

        for (symbol, count) in &counts {
            append_element(&mut formula, symbol, *count);
        }
        formula
    }
}

fn append_element(buffer: &mut String, symbol: &str, count: u64) {
    buffer.push_str(symbol);
    if count > 1 {
        buffer.push_str(&count.to_string());
    }
}
