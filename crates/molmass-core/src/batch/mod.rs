use crate::domain::{CompositionResult, FormulaError, MolmassError, MolmassResult};
use crate::parser::parse_formula;
use crate::serialization::write_text_artifact;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct BatchRunnerConfig {
    pub input_path: PathBuf,
    pub report_path: PathBuf,
}

impl Default for BatchRunnerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("formulas.txt"),
            report_path: PathBuf::from("artifacts/molmass/report.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchRunReport {
    pub generated_at_unix_seconds: u64,
    pub passed: bool,
    pub input_path: String,
    pub formula_count: usize,
    pub parsed_count: usize,
    pub failed_count: usize,
    pub formulas: Vec<FormulaReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormulaReport {
    pub line: usize,
    pub formula: String,
    pub passed: bool,
    pub hill_formula: Option<String>,
    pub composition: Option<CompositionResult>,
    pub error: Option<FormulaErrorReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormulaErrorReport {
    pub placeholder: String,
    pub message: String,
    pub position: Option<usize>,
}

impl From<&FormulaError> for FormulaErrorReport {
    fn from(error: &FormulaError) -> Self {
        Self {
            placeholder: error.placeholder().to_string(),
            message: error.to_string(),
            position: error.position(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaLine {
    pub line: usize,
    pub formula: String,
}

/// Splits batch input into one formula per line.
///
/// Blank lines and lines starting with `#` are skipped; a trailing `#` comment
/// is stripped. Line numbers are 1-based.
pub fn read_formula_lines(source: &str) -> Vec<FormulaLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let formula = strip_comment(line).trim();
            (!formula.is_empty()).then(|| FormulaLine {
                line: index + 1,
                formula: formula.to_string(),
            })
        })
        .collect()
}

pub fn evaluate_formulas(lines: &[FormulaLine]) -> Vec<FormulaReport> {
    lines
        .iter()
        .map(|formula_line| match parse_formula(&formula_line.formula) {
            Ok(composition) => FormulaReport {
                line: formula_line.line,
                formula: formula_line.formula.clone(),
                passed: true,
                hill_formula: Some(composition.hill_formula()),
                composition: Some(composition),
                error: None,
            },
            Err(error) => {
                debug!(line = formula_line.line, %error, "formula rejected");
                FormulaReport {
                    line: formula_line.line,
                    formula: formula_line.formula.clone(),
                    passed: false,
                    hill_formula: None,
                    composition: None,
                    error: Some(FormulaErrorReport::from(&error)),
                }
            }
        })
        .collect()
}

pub fn run_batch(config: &BatchRunnerConfig) -> MolmassResult<BatchRunReport> {
    let source = fs::read_to_string(&config.input_path).map_err(|source| {
        MolmassError::from(BatchRunnerError::ReadInput {
            path: config.input_path.clone(),
            source,
        })
    })?;

    let lines = read_formula_lines(&source);
    let formulas = evaluate_formulas(&lines);
    let formula_count = formulas.len();
    let parsed_count = formulas.iter().filter(|report| report.passed).count();
    let failed_count = formula_count.saturating_sub(parsed_count);

    let report = BatchRunReport {
        generated_at_unix_seconds: current_unix_timestamp_seconds(),
        passed: failed_count == 0,
        input_path: normalize_path(&config.input_path),
        formula_count,
        parsed_count,
        failed_count,
        formulas,
    };
    info!(
        input = %report.input_path,
        formula_count,
        failed_count,
        "batch evaluation finished"
    );

    write_report_file(&config.report_path, &report).map_err(MolmassError::from)?;
    Ok(report)
}

pub fn render_human_summary(report: &BatchRunReport) -> String {
    let mut lines = Vec::new();
    let status = if report.passed { "PASS" } else { "FAIL" };
    lines.push(format!("Batch status: {}", status));
    lines.push(format!(
        "Formulas: {} total ({} parsed, {} failed)",
        report.formula_count, report.parsed_count, report.failed_count
    ));

    for formula in &report.formulas {
        match (&formula.composition, &formula.error) {
            (Some(composition), _) => lines.push(format!(
                "Line {}: {} -> {:.4} g/mol",
                formula.line, formula.formula, composition.molecular_weight
            )),
            (None, Some(error)) => lines.push(format!(
                "Line {}: {} -> [{}] {}",
                formula.line, formula.formula, error.placeholder, error.message
            )),
            (None, None) => lines.push(format!(
                "Line {}: {} -> no result recorded",
                formula.line, formula.formula
            )),
        }
    }

    lines.join("\n")
}

#[derive(Debug, thiserror::Error)]
pub enum BatchRunnerError {
    #[error("failed to read formula list '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create report directory '{}': {source}", path.display())]
    ReportDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report '{}': {source}", path.display())]
    SerializeReport {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write report '{}': {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<BatchRunnerError> for MolmassError {
    fn from(error: BatchRunnerError) -> Self {
        let message = error.to_string();
        match error {
            BatchRunnerError::ReadInput { .. } => {
                MolmassError::io_system("IO.BATCH_INPUT", message)
            }
            BatchRunnerError::ReportDirectory { .. } | BatchRunnerError::WriteReport { .. } => {
                MolmassError::io_system("IO.BATCH_REPORT", message)
            }
            BatchRunnerError::SerializeReport { .. } => {
                MolmassError::internal("SYS.BATCH_REPORT", message)
            }
        }
    }
}

fn strip_comment(line: &str) -> &str {
    if let Some((prefix, _)) = line.split_once('#') {
        prefix
    } else {
        line
    }
}

fn write_report_file(path: &Path, report: &BatchRunReport) -> Result<(), BatchRunnerError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| BatchRunnerError::ReportDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let content =
        serde_json::to_string_pretty(report).map_err(|source| BatchRunnerError::SerializeReport {
            path: path.to_path_buf(),
            source,
        })?;
    write_text_artifact(path, &content).map_err(|source| BatchRunnerError::WriteReport {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn current_unix_timestamp_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{
        BatchRunnerConfig, BatchRunnerError, FormulaLine, read_formula_lines,
        render_human_summary, run_batch,
    };
    use crate::domain::{ErrorCategory, MolmassError};
    use serde_json::Value;
    use std::error::Error;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn formula_lines_skip_blanks_and_comments() {
        let lines = read_formula_lines("# salts\nNaCl\n\n  Ca(OH)2  # slaked lime\n#H2O\n");
        assert_eq!(
            lines,
            vec![
                FormulaLine {
                    line: 2,
                    formula: "NaCl".to_string(),
                },
                FormulaLine {
                    line: 4,
                    formula: "Ca(OH)2".to_string(),
                },
            ]
        );
    }

    #[test]
    fn batch_run_writes_report_with_per_formula_outcomes() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input_path = temp.path().join("formulas.txt");
        let report_path = temp.path().join("nested/report.json");
        fs::write(&input_path, "H2O\nXx2O\nCa(OH2\n").expect("input should be written");

        let config = BatchRunnerConfig {
            input_path,
            report_path: report_path.clone(),
        };
        let report = run_batch(&config).expect("batch should run");

        assert!(!report.passed);
        assert_eq!(report.formula_count, 3);
        assert_eq!(report.parsed_count, 1);
        assert_eq!(report.failed_count, 2);
        assert_eq!(report.formulas[0].hill_formula.as_deref(), Some("H2O"));

        let raw = fs::read_to_string(&report_path).expect("report should be readable");
        assert!(raw.ends_with("}\n"));
        assert!(!raw.contains('\r'));
        let parsed: Value = serde_json::from_str(&raw).expect("report JSON should parse");
        assert_eq!(parsed["passed"], Value::Bool(false));
        assert_eq!(
            parsed["formulas"][1]["error"]["placeholder"],
            "INPUT.UNKNOWN_ELEMENT"
        );
        assert_eq!(parsed["formulas"][2]["error"]["position"], 2);
        assert!(parsed["formulas"][0]["composition"]["molecularWeight"].is_number());

        let summary = render_human_summary(&report);
        assert!(summary.starts_with("Batch status: FAIL"));
        assert!(summary.contains("Formulas: 3 total (1 parsed, 2 failed)"));
        assert!(summary.contains("Line 1: H2O -> 18.0150 g/mol"));
        assert!(summary.contains("Line 2: Xx2O -> [INPUT.UNKNOWN_ELEMENT]"));
    }

    #[test]
    fn missing_input_maps_to_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let config = BatchRunnerConfig {
            input_path: temp.path().join("missing.txt"),
            report_path: temp.path().join("report.json"),
        };

        let error = run_batch(&config).expect_err("missing input should fail");
        assert_eq!(error.category(), ErrorCategory::IoSystemError);
        assert_eq!(error.placeholder(), "IO.BATCH_INPUT");
        assert_eq!(error.exit_code(), 3);
        assert!(!config.report_path.exists());
        assert!(error.message().starts_with("failed to read formula list"));
    }

    #[test]
    fn runner_errors_keep_their_io_source() {
        let error = BatchRunnerError::WriteReport {
            path: PathBuf::from("out/report.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(error.to_string(), "failed to write report 'out/report.json': denied");
        assert!(error.source().is_some());

        let diagnostic = MolmassError::from(error);
        assert_eq!(diagnostic.placeholder(), "IO.BATCH_REPORT");
        assert_eq!(diagnostic.exit_code(), 3);
    }
}
