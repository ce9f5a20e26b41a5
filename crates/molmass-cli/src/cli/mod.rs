mod commands;
mod helpers;

use clap::Parser;
use molmass_core::domain::MolmassError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_molmass_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            if let Some(summary_line) = diagnostic.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            diagnostic.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_logging(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "molmass",
    version,
    about = "Molar mass and elemental composition of chemical formulas"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Parse formulas and print their composition
    Parse(commands::ParseArgs),
    /// List the atomic weight table
    Elements(commands::ElementsArgs),
    /// Evaluate a file of formulas and write a JSON report
    Batch(commands::BatchArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Parse(args) => commands::run_parse_command(args),
        CliCommand::Elements(args) => commands::run_elements_command(args),
        CliCommand::Batch(args) => commands::run_batch_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Molmass(MolmassError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_molmass_error(&self) -> MolmassError {
        match self {
            Self::Usage(message) => {
                MolmassError::input_validation("INPUT.CLI_USAGE", message.trim_end())
            }
            Self::Molmass(error) => error.clone(),
            Self::Internal(error) => MolmassError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
