use super::groups::{ExpandedFormula, FormulaChar};
use crate::common::pertab::ElementSymbol;
use crate::domain::{ElementCount, FormulaError, FormulaResult};
use std::collections::BTreeMap;

/// Scans a flat formula into per-element counts.
///
/// Each token is an uppercase letter, an optional lowercase letter and an
/// optional digit run. Repeated symbols are summed. The result is sorted by
/// symbol.
pub fn tokenize_elements(formula: &ExpandedFormula) -> FormulaResult<Vec<ElementCount>> {
    let chars = formula.chars();
    let mut totals: BTreeMap<ElementSymbol, u64> = BTreeMap::new();

    let mut index = 0;
    while index < chars.len() {
        let head = chars[index];
        if !head.ch.is_ascii_uppercase() {
            return Err(unexpected_character(head));
        }

        let mut last = head;
        let mut symbol = String::from(head.ch);
        index += 1;
        if let Some(next) = chars.get(index).copied()
            && next.ch.is_ascii_lowercase()
            && next.follows(last)
        {
            symbol.push(next.ch);
            last = next;
            index += 1;
        }

        let element = ElementSymbol::parse(&symbol)
            .ok_or_else(|| FormulaError::unknown_element(symbol.as_str(), head.position))?;

        let digits_start = index;
        while let Some(next) = chars.get(index).copied()
            && next.ch.is_ascii_digit()
            && next.follows(last)
        {
            last = next;
            index += 1;
        }
        let count = parse_count(&chars[digits_start..index])?;

        let total = totals.entry(element).or_default();
        *total = total.checked_add(count).ok_or_else(|| {
            FormulaError::syntax(head.position, format!("count for '{element}' overflows"))
        })?;
    }

    if totals.is_empty() {
        return Err(FormulaError::EmptyFormula);
    }

    Ok(totals
        .into_iter()
        .map(|(symbol, count)| ElementCount::new(symbol, count))
        .collect())
}

fn parse_count(digits: &[FormulaChar]) -> FormulaResult<u64> {
    let Some(first) = digits.first() else {
        return Ok(1);
    };

    let text: String = digits.iter().map(|digit| digit.ch).collect();
    let count = text.parse::<u64>().map_err(|_| {
        FormulaError::syntax(first.position, format!("count '{text}' is too large"))
    })?;
    if count == 0 {
        return Err(FormulaError::syntax(first.position, "zero count"));
    }
    Ok(count)
}

fn unexpected_character(formula_char: FormulaChar) -> FormulaError {
    let ch = formula_char.ch;
    let message = match ch {
        '0'..='9' => format!("count '{ch}' has no preceding element symbol"),
        '[' | ']' => "square-bracket groups are not supported".to_string(),
        _ if ch.is_lowercase() => format!("unexpected lowercase letter '{ch}'"),
        _ => format!("unexpected character '{ch}'"),
    };
    FormulaError::syntax(formula_char.position, message)
}
