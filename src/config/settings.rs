use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use geolive_core::render::ChartSize;
use geolive_core::{Credentials, OutputMode, SystemId};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Watch live power usage from a geotogether smart meter",
    disable_help_flag = true
)]
pub struct Config {
    /// Account username (email address)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Account password
    #[arg(short, long)]
    pub password: Option<String>,

    /// System to monitor (defaults to the first system on the account)
    #[arg(short, long)]
    pub system: Option<String>,

    /// Refresh interval in seconds
    #[arg(short, long, default_value = "30", allow_hyphen_values = true)]
    pub refresh: String,

    /// Chart width (defaults to the terminal width)
    #[arg(short, long, allow_hyphen_values = true)]
    pub width: Option<i64>,

    /// Chart height (defaults to the terminal height)
    #[arg(short = 'h', long, allow_hyphen_values = true)]
    pub height: Option<i64>,

    /// Output type: chart or text
    #[arg(short, long, default_value = "chart")]
    pub output: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    pub help: Option<bool>,
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Startup configuration errors (fatal, exit status 1)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Username and password must be provided")]
    MissingCredentials,

    #[error("Minimum refresh interval is 1 second")]
    InvalidRefresh,

    #[error("Output type must be chart or text")]
    InvalidOutput,

    #[error("Chart width and height must be between 1 and {}", MAX_CHART_DIM)]
    InvalidChartSize,
}

/// Size of the attached terminal, used for chart defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub columns: u16,
    pub rows: u16,
}

impl TerminalSize {
    /// Query the terminal; `None` when stdout is not a terminal
    pub fn detect() -> Option<Self> {
        crossterm::terminal::size()
            .ok()
            .map(|(columns, rows)| Self { columns, rows })
    }
}

const DEFAULT_WIDTH: i64 = 100;
const DEFAULT_HEIGHT: i64 = 10;

/// Largest chart dimension accepted, the range of a terminal size
const MAX_CHART_DIM: i64 = u16::MAX as i64;

/// Validated application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    /// Explicit system, skips discovery when set
    pub system: Option<SystemId>,
    pub refresh: Duration,
    pub output: OutputMode,
    pub chart: ChartSize,
}

impl Settings {
    /// Validate CLI arguments, filling chart defaults from the terminal size
    pub fn from_cli(cli: &Config, terminal: Option<TerminalSize>) -> Result<Self, ConfigError> {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        let credentials = (non_empty(&cli.username), non_empty(&cli.password));
        let (Some(username), Some(password)) = credentials else {
            return Err(ConfigError::MissingCredentials);
        };

        let refresh_secs: i64 = cli
            .refresh
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidRefresh)?;
        if refresh_secs < 1 {
            return Err(ConfigError::InvalidRefresh);
        }

        let output: OutputMode = cli
            .output
            .parse()
            .map_err(|_| ConfigError::InvalidOutput)?;

        let terminal_dim = |dim: Option<u16>, fallback: i64| {
            dim.filter(|&d| d > 0).map(i64::from).unwrap_or(fallback)
        };
        let width = cli
            .width
            .unwrap_or_else(|| terminal_dim(terminal.map(|t| t.columns), DEFAULT_WIDTH));
        let height = cli
            .height
            .unwrap_or_else(|| terminal_dim(terminal.map(|t| t.rows), DEFAULT_HEIGHT));
        let valid = 1..=MAX_CHART_DIM;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(ConfigError::InvalidChartSize);
        }

        Ok(Self {
            credentials: Credentials::new(username, password),
            system: non_empty(&cli.system).map(SystemId::new),
            refresh: Duration::from_secs(refresh_secs as u64),
            output,
            chart: ChartSize {
                width: width as usize,
                height: height as usize,
            },
        })
    }
}
