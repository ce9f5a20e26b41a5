use crate::domain::{FormulaError, FormulaResult};
use tracing::trace;

/// Upper bound on the length of a fully expanded formula.
pub const MAX_EXPANDED_LEN: usize = 1 << 20;

/// One character of a formula tagged with where it came from.
///
/// `position` is the offset in the trimmed input, used for diagnostics.
/// `index` is the offset in the whitespace-free stream; two characters belong
/// to the same token only when their indices are consecutive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaChar {
    pub ch: char,
    pub position: usize,
    pub index: usize,
}

impl FormulaChar {
    pub fn follows(self, previous: FormulaChar) -> bool {
        self.index == previous.index + 1
    }
}

/// Parenthesis-free formula produced by [`expand_groups`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpandedFormula {
    chars: Vec<FormulaChar>,
}

impl ExpandedFormula {
    pub fn chars(&self) -> &[FormulaChar] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_text(&self) -> String {
        self.chars.iter().map(|formula_char| formula_char.ch).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenGroup {
    start: usize,
    position: usize,
}

/// Strips whitespace from a trimmed formula, keeping source positions.
pub fn compact_formula(formula: &str) -> Vec<FormulaChar> {
    formula
        .chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .enumerate()
        .map(|(index, (position, ch))| FormulaChar {
            ch,
            position,
            index,
        })
        .collect()
}

/// Replaces every parenthesised group with its content repeated by the
/// group's trailing multiplier.
///
/// Groups close innermost first: a `)` always closes the most recent open
/// `(`, and its content at that point is already flat. The open groups live
/// on a growable stack so nesting depth is bounded only by input length.
pub fn expand_groups(source: &[FormulaChar]) -> FormulaResult<ExpandedFormula> {
    let mut output: Vec<FormulaChar> = Vec::with_capacity(source.len());
    let mut open_groups: Vec<OpenGroup> = Vec::new();

    let mut index = 0;
    while index < source.len() {
        let current = source[index];
        match current.ch {
            '(' => {
                open_groups.push(OpenGroup {
                    start: output.len(),
                    position: current.position,
                });
                index += 1;
            }
            ')' => {
                let Some(group) = open_groups.pop() else {
                    return Err(FormulaError::syntax(
                        current.position,
                        "unbalanced parentheses: unmatched ')'",
                    ));
                };
                let (multiplier, next_index) = read_multiplier(source, index + 1)?;
                close_group(&mut output, group, multiplier)?;
                trace!(
                    position = group.position,
                    multiplier,
                    depth = open_groups.len(),
                    "closed formula group"
                );
                index = next_index;
            }
            _ => {
                output.push(current);
                index += 1;
            }
        }
    }

    if let Some(group) = open_groups.last() {
        return Err(FormulaError::syntax(
            group.position,
            "unbalanced parentheses: unmatched '('",
        ));
    }

    Ok(ExpandedFormula { chars: output })
}

fn read_multiplier(source: &[FormulaChar], start: usize) -> FormulaResult<(u32, usize)> {
    let end = source[start..]
        .iter()
        .position(|formula_char| !formula_char.ch.is_ascii_digit())
        .map_or(source.len(), |offset| start + offset);
    if end == start {
        return Ok((1, start));
    }

    let position = source[start].position;
    let digits: String = source[start..end]
        .iter()
        .map(|formula_char| formula_char.ch)
        .collect();
    let multiplier = digits.parse::<u32>().map_err(|_| {
        FormulaError::syntax(position, format!("group multiplier '{digits}' is too large"))
    })?;
    if multiplier == 0 {
        return Err(FormulaError::syntax(position, "zero multiplier"));
    }
    Ok((multiplier, end))
}

fn close_group(
    output: &mut Vec<FormulaChar>,
    group: OpenGroup,
    multiplier: u32,
) -> FormulaResult<()> {
    let content_len = output.len() - group.start;
    let expanded_len = content_len
        .checked_mul(multiplier as usize)
        .and_then(|len| len.checked_add(group.start))
        .filter(|len| *len <= MAX_EXPANDED_LEN)
        .ok_or_else(|| {
            FormulaError::syntax(
                group.position,
                format!("expanded formula exceeds {MAX_EXPANDED_LEN} characters"),
            )
        })?;

    output.reserve(expanded_len - output.len());
    let content = group.start..group.start + content_len;
    for _ in 1..multiplier {
        output.extend_from_within(content.clone());
    }
    Ok(())
}
