//! Config module.
//! Builds the CLI and turns its matches into a `Config`.
//! With no arguments the program prints the plain 8x8 grid.
//! Unknown arguments are ignored and never stop the board from printing.
//! `DEBUG_RENDER=1` reports render latency on stderr.

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::env;

/// Output format for the board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// 8 lines of 8 glyphs (default, matches the classic output)
    #[default]
    Grid,
    /// FEN string, white to move
    Fen,
    /// JSON snapshot with packed bytes, rows and FEN
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Grid => write!(f, "grid"),
            OutputFormat::Fen => write!(f, "fen"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "grid" => Ok(OutputFormat::Grid),
            "fen" => Ok(OutputFormat::Fen),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown output format '{}'", other),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub format: OutputFormat,
    pub debug: bool,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Config> {
        let format = matches
            .get_one::<String>("format")
            .map(|s| s.parse::<OutputFormat>())
            .transpose()
            .context("Failed to read --format")?
            .unwrap_or_default();

        Ok(Config {
            format,
            debug: env::var_os("DEBUG_RENDER").is_some(),
        })
    }
}

pub fn cli() -> Command {
    Command::new("nibble-board")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prints the chess starting position from a nibble-packed board")
        // Stray or malformed arguments fall back to the defaults
        .ignore_errors(true)
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .default_value("grid")
                .value_parser(["grid", "fen", "json"]) // Allowed values
        )
}
