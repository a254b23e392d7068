//! meetcost - Live meeting cost meter

mod cli;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use meetcost_core::MeterConfig;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MEETCOST_LOG";

#[derive(Parser)]
#[command(
    name = "meetcost",
    version,
    about = "Live meeting cost meter",
    long_about = "Tracks how much a meeting costs while it runs.\n\
                  \n\
                  Start and stop the clock, add or remove attendees, and watch the\n\
                  cost accrue at a per-attendee hourly rate.\n\
                  \n\
                  Examples:\n\
                    meetcost                                   # Run TUI (default)\n\
                    meetcost --rate 85                         # Start with $85/hr per attendee\n\
                    meetcost estimate --attendees 6 --minutes 45 --rate 120\n\
                    meetcost estimate -a 6 -m 45 --json        # Machine-readable output\n\
                  \n\
                  Environment Variables:\n\
                    MEETCOST_RATE                              # Default hourly rate\n\
                    MEETCOST_CURRENCY                          # Currency symbol\n\
                    MEETCOST_CONFIG                            # Config file path\n\
                    MEETCOST_NO_COLOR                          # Disable ANSI colors\n\
                    MEETCOST_LOG                               # Log filter (e.g. debug)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Hourly rate per attendee (overrides config)
    #[arg(long, env = "MEETCOST_RATE")]
    rate: Option<String>,

    /// Currency symbol used in cost labels (overrides config)
    #[arg(long, env = "MEETCOST_CURRENCY")]
    currency: Option<String>,

    /// Path to config file (default: <config_dir>/meetcost/config.json)
    #[arg(long, env = "MEETCOST_CONFIG")]
    config: Option<PathBuf>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "MEETCOST_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Run TUI interface (default)
    Tui,
    /// Estimate the cost of a meeting and exit
    Estimate {
        /// Number of attendees
        #[arg(long, short = 'a')]
        attendees: u32,
        /// Meeting length in minutes
        #[arg(long, short = 'm')]
        minutes: u64,
        /// Hourly rate per attendee (defaults to the configured rate)
        #[arg(long, short = 'r')]
        rate: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode.unwrap_or(Mode::Tui);

    match mode {
        Mode::Tui => init_file_logging()?,
        Mode::Estimate { .. } => init_stderr_logging(cli.no_color)?,
    }

    let mut config = load_config(cli.config);
    if let Some(rate) = cli.rate {
        config.default_rate = rate;
    }
    if let Some(currency) = cli.currency {
        config.currency_symbol = currency;
    }

    match mode {
        Mode::Tui => {
            info!("Starting meter");
            meetcost_tui::run(config)?;
        }
        Mode::Estimate {
            attendees,
            minutes,
            rate,
            json,
        } => {
            let rate = rate.unwrap_or(config.default_rate);
            let estimate = cli::run_estimate(attendees, minutes, &rate)?;
            println!(
                "{}",
                cli::format_estimate(&estimate, &config.currency_symbol, json, cli.no_color)
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> MeterConfig {
    match path.or_else(MeterConfig::default_path) {
        Some(path) => MeterConfig::load(&path),
        None => MeterConfig::default(),
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Log to `<cache_dir>/meetcost/meetcost.log` so output never lands on the TUI
fn init_file_logging() -> Result<()> {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("meetcost")) else {
        // No cache dir: run without logs rather than scribble on the screen
        return Ok(());
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let path = dir.join("meetcost.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))
}

fn init_stderr_logging(no_color: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_target(false)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_subscriber_install_is_reported() {
        assert!(init_stderr_logging(true).is_ok());
        let err = init_stderr_logging(true).unwrap_err();
        assert!(err.to_string().contains("Failed to install log subscriber"));
    }

    #[test]
    fn test_cli_overrides_parse() {
        let cli = Cli::try_parse_from([
            "meetcost", "--rate", "85", "--currency", "€", "estimate", "-a", "3", "-m", "20",
        ])
        .unwrap();

        assert_eq!(cli.rate.as_deref(), Some("85"));
        assert_eq!(cli.currency.as_deref(), Some("€"));
        assert!(matches!(
            cli.mode,
            Some(Mode::Estimate {
                attendees: 3,
                minutes: 20,
                rate: None,
                json: false
            })
        ));
    }
}
