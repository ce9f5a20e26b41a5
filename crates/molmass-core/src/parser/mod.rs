//! Formula interpretation pipeline.
//!
//! `parse_formula` trims the input, removes whitespace, expands parenthesised
//! groups, tokenizes element counts and hands them to the composition
//! calculator. The first failing stage decides the error.

pub mod groups;
pub mod tokenizer;

pub use groups::{ExpandedFormula, FormulaChar, MAX_EXPANDED_LEN, compact_formula, expand_groups};
pub use tokenizer::tokenize_elements;

use crate::composition::compose;
use crate::domain::{CompositionResult, FormulaError, FormulaResult};
use tracing::debug;

pub fn parse_formula(input: &str) -> FormulaResult<CompositionResult> {
    let formula = input.trim();
    if formula.is_empty() {
        return Err(FormulaError::EmptyFormula);
    }

    let expanded = expand_groups(&compact_formula(formula))?;
    debug!(formula, expanded = %expanded.as_text(), "expanded formula groups");

    let counts = tokenize_elements(&expanded)?;
    debug!(formula, elements = counts.len(), "tokenized element counts");

    compose(formula, &counts)
}
