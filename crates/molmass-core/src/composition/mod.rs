use crate::common::constants::PERCENT_SCALE;
use crate::domain::{CompositionEntry, CompositionResult, ElementCount, FormulaError, FormulaResult};
use std::collections::BTreeSet;

/// Builds the mass breakdown for aggregated element counts.
///
/// Counts must be at least one and symbols must be unique; the tokenizer
/// guarantees both, so a violation here is an internal invariant failure.
pub fn compose(formula: &str, counts: &[ElementCount]) -> FormulaResult<CompositionResult> {
    let mut seen = BTreeSet::new();
    let mut elements = Vec::with_capacity(counts.len());
    for element_count in counts {
        if element_count.count == 0 {
            return Err(FormulaError::invariant(format!(
                "element '{}' has a zero count",
                element_count.symbol
            )));
        }
        if !seen.insert(element_count.symbol) {
            return Err(FormulaError::invariant(format!(
                "element '{}' appears more than once",
                element_count.symbol
            )));
        }

        let atomic_weight = element_count.symbol.atomic_weight();
        elements.push(CompositionEntry {
            symbol: element_count.symbol,
            count: element_count.count,
            atomic_weight,
            total_mass: element_count.count as f64 * atomic_weight,
            percentage: 0.0,
        });
    }

    let molecular_weight: f64 = elements.iter().map(|entry| entry.total_mass).sum();
    if !(molecular_weight.is_finite() && molecular_weight > 0.0) {
        return Err(FormulaError::invariant(format!(
            "molecular weight must be positive and finite, got {molecular_weight}"
        )));
    }

    for entry in &mut elements {
        entry.percentage = entry.total_mass / molecular_weight * PERCENT_SCALE;
    }
    elements.sort_by(|left, right| {
        right
            .percentage
            .total_cmp(&left.percentage)
            .then_with(|| left.symbol.cmp(&right.symbol))
    });

    Ok(CompositionResult {
        molecular_weight,
        formula: formula.to_string(),
        elements,
    })
}
