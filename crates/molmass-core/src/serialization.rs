use crate::common::pertab::ElementSymbol;
use crate::domain::CompositionResult;
use std::fs;
use std::path::Path;

pub const DEFAULT_PRECISION: usize = 3;

pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, normalize_text_artifact(content))
}

/// Renders a composition as a fixed-width table.
///
/// Masses use `precision` decimals; percentages always use two.
pub fn render_composition_table(result: &CompositionResult, precision: usize) -> String {
    let mut lines = Vec::with_capacity(result.elements.len() + 4);
    lines.push(format!("Formula: {} ({})", result.formula, result.hill_formula()));
    lines.push(format!(
        "Molecular weight: {} g/mol",
        format_fixed_f64(result.molecular_weight, 0, precision)
    ));
    lines.push(format!(
        "{:<8}{:>8}{:>16}{:>16}{:>10}",
        "Element", "Count", "Atomic weight", "Mass (g/mol)", "Percent"
    ));
    for entry in &result.elements {
        lines.push(format!(
            "{:<8}{:>8}{}{}{}%",
            entry.symbol.as_str(),
            entry.count,
            format_fixed_f64(entry.atomic_weight, 16, precision),
            format_fixed_f64(entry.total_mass, 16, precision),
            format_fixed_f64(entry.percentage, 9, 2)
        ));
    }
    lines.join("\n")
}

pub fn render_element_table(
    elements: impl IntoIterator<Item = ElementSymbol>,
    precision: usize,
) -> String {
    let mut lines = vec![format!("{:>4}  {:<8}{:>14}", "Z", "Symbol", "Weight")];
    for element in elements {
        lines.push(format!(
            "{:>4}  {:<8}{}",
            element.atomic_number(),
            element.as_str(),
            format_fixed_f64(element.atomic_weight(), 14, precision)
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{
        format_fixed_f64, normalize_text_artifact, render_composition_table,
        render_element_table, write_text_artifact,
    };
    use crate::common::pertab::elements;
    use crate::parser::parse_formula;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn fixed_width_float_formatting_is_deterministic() {
        let first = format_fixed_f64(1.23, 13, 5);
        let second = format_fixed_f64(1.23, 13, 5);

        assert_eq!(first, "      1.23000");
        assert_eq!(first, second);
    }

    #[test]
    fn normalize_text_artifact_uses_canonical_line_endings() {
        let normalized = normalize_text_artifact("alpha\r\nbeta\rgamma");
        assert_eq!(normalized, "alpha\nbeta\ngamma\n");
    }

    #[test]
    fn repeated_text_writes_produce_identical_bytes() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("composition.txt");
        let input = "line 1\r\nline 2\rline 3";

        write_text_artifact(&path, input).expect("first write should succeed");
        let first = fs::read(&path).expect("artifact should be readable");

        write_text_artifact(&path, input).expect("second write should succeed");
        let second = fs::read(&path).expect("artifact should be readable");

        assert_eq!(first, second);
        assert_eq!(second, b"line 1\nline 2\nline 3\n");
    }

    #[test]
    fn composition_table_lists_elements_by_percentage() {
        let result = parse_formula("H2O").expect("water should parse");
        let table = render_composition_table(&result, 3);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Formula: H2O (H2O)");
        assert_eq!(lines[1], "Molecular weight: 18.015 g/mol");
        assert!(lines[2].starts_with("Element"));
        assert!(lines[3].starts_with("O "));
        assert!(lines[3].ends_with("88.81%"));
        assert!(lines[4].starts_with("H "));
        assert!(lines[4].ends_with("11.19%"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn element_table_has_one_row_per_element() {
        let table = render_element_table(elements(), 4);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 97);
        let first: Vec<&str> = lines[1].split_whitespace().collect();
        let last: Vec<&str> = lines[96].split_whitespace().collect();
        assert_eq!(first, vec!["1", "H", "1.0080"]);
        assert_eq!(last, vec!["96", "Cm", "247.0000"]);
    }
}
