use super::CliError;
use anyhow::Context;
use molmass_core::ElementSymbol;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub(super) const LOG_ENV_VAR: &str = "MOLMASS_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ElementRecord {
    symbol: &'static str,
    atomic_number: usize,
    atomic_weight: f64,
}

impl From<ElementSymbol> for ElementRecord {
    fn from(element: ElementSymbol) -> Self {
        Self {
            symbol: element.as_str(),
            atomic_number: element.atomic_number(),
            atomic_weight: element.atomic_weight(),
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `MOLMASS_LOG` takes precedence over the `-v` count when it holds a valid
/// filter directive.
pub(super) fn init_logging(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed by an embedding process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub(super) fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize JSON output")?;
    Ok(rendered)
}
