//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{DecimalMark, Language};

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table (default)
    Text,
    /// HTML rows
    Html,
    /// JSON with full-precision numbers
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "u-normality")]
#[command(version)]
#[command(
    about = "Shapiro-Wilk normality test for 10 to 30 values",
    long_about = "Reads 10 to 30 numbers and reports mean, standard deviation, \
                  Shapiro-Wilk W and p-value, and whether normality is accepted at alpha = 5%.\n\n\
                  Put one value per line, or separate values with \", \" (comma and space). \
                  A comma without a following space is a decimal mark (\"1,5\" is 1.5) unless \
                  every value around it uses a period (\"1.5,2.5\"). Input that mixes the two \
                  conventions, like \"1.234,5\", is rejected."
)]
pub struct Cli {
    /// File with the values (reads stdin when omitted and --values is not given)
    #[arg(value_name = "FILE", conflicts_with = "values")]
    pub input: Option<PathBuf>,

    /// Values given inline, e.g. --values "15.2, 16.1, 14.8, ..."
    #[arg(short = 'v', long = "values", value_name = "TEXT")]
    pub values: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with presentation settings
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Label language (overrides the config file)
    #[arg(long = "lang", value_enum)]
    pub language: Option<Language>,

    /// Decimal mark for printed numbers (overrides the config file)
    #[arg(long = "decimal", value_enum)]
    pub decimal_mark: Option<DecimalMark>,

    /// Include histogram bins, density and Q-Q points
    #[arg(long = "chart-data")]
    pub chart_data: bool,

    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug: bool,
}
