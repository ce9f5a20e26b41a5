use super::CliError;
use super::helpers::{ElementRecord, OutputFormat, to_pretty_json};
use molmass_core::batch::{BatchRunnerConfig, render_human_summary, run_batch};
use molmass_core::common::pertab::elements;
use molmass_core::domain::MolmassError;
use molmass_core::parse_formula;
use molmass_core::serialization::{
    DEFAULT_PRECISION, render_composition_table, render_element_table,
};
use std::path::PathBuf;
use tracing::info;

#[derive(clap::Args)]
pub(super) struct ParseArgs {
    /// Formulas to interpret, e.g. H2O or "Ca(OH)2"
    #[arg(required = true, value_name = "FORMULA")]
    formulas: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Decimal places for masses in text output
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,
}

#[derive(clap::Args)]
pub(super) struct ElementsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Decimal places for weights in text output
    #[arg(long, default_value_t = 4)]
    precision: usize,
}

#[derive(clap::Args)]
pub(super) struct BatchArgs {
    /// File with one formula per line ('#' starts a comment)
    #[arg(long)]
    input: PathBuf,

    /// JSON report output path
    #[arg(long, default_value = "artifacts/molmass/report.json")]
    report: PathBuf,
}

impl BatchArgs {
    fn into_config(self) -> BatchRunnerConfig {
        BatchRunnerConfig {
            input_path: self.input,
            report_path: self.report,
        }
    }
}

pub(super) fn run_parse_command(args: ParseArgs) -> Result<i32, CliError> {
    let mut results = Vec::with_capacity(args.formulas.len());
    let mut exit_code = 0;

    for formula in &args.formulas {
        match parse_formula(formula) {
            Ok(result) => results.push(result),
            Err(error) => {
                let diagnostic = MolmassError::from(&error);
                eprintln!("{}", diagnostic.diagnostic_line());
                if exit_code == 0 {
                    exit_code = diagnostic.exit_code();
                }
            }
        }
    }
    info!(
        requested = args.formulas.len(),
        parsed = results.len(),
        "parsed formulas"
    );

    match args.format {
        OutputFormat::Text => {
            let tables: Vec<String> = results
                .iter()
                .map(|result| render_composition_table(result, args.precision))
                .collect();
            if !tables.is_empty() {
                println!("{}", tables.join("\n\n"));
            }
        }
        OutputFormat::Json => println!("{}", to_pretty_json(&results)?),
    }

    if exit_code != 0 {
        eprintln!("FATAL EXIT CODE: {}", exit_code);
    }
    Ok(exit_code)
}

pub(super) fn run_elements_command(args: ElementsArgs) -> Result<i32, CliError> {
    match args.format {
        OutputFormat::Text => println!("{}", render_element_table(elements(), args.precision)),
        OutputFormat::Json => {
            let records: Vec<ElementRecord> = elements().map(ElementRecord::from).collect();
            println!("{}", to_pretty_json(&records)?);
        }
    }
    Ok(0)
}

pub(super) fn run_batch_command(args: BatchArgs) -> Result<i32, CliError> {
    let config = args.into_config();
    let report = run_batch(&config).map_err(CliError::Molmass)?;
    println!("{}", render_human_summary(&report));
    println!("JSON report: {}", config.report_path.display());

    if report.passed { Ok(0) } else { Ok(1) }
}
