use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use u_normality::cli::{Cli, OutputFormat};
use u_normality::config::RenderConfig;
use u_normality::{analyze, render};

/// Initialize tracing: `--debug` turns on debug level, otherwise `RUST_LOG`
/// decides (quiet by default).
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(cli: &Cli) -> Result<String> {
    if let Some(values) = &cli.values {
        return Ok(values.clone());
    }
    match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn load_config(cli: &Cli) -> Result<RenderConfig> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(language) = cli.language {
        config.language = language;
    }
    if let Some(mark) = cli.decimal_mark {
        config.decimal_mark = mark;
    }
    if cli.chart_data {
        config.show_chart_data = true;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;
    let raw = read_input(cli)?;

    let report = match analyze(&raw) {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!(error = %err, "analysis rejected");
            eprintln!("{}", render::error_message(&err, config.language));
            return Ok(ExitCode::FAILURE);
        }
    };

    let out = match cli.format {
        OutputFormat::Text => render::text(&report, &config),
        OutputFormat::Html => render::html(&report, &config),
        OutputFormat::Json => render::json(&report, config.show_chart_data)?,
    };
    print!("{out}");
    if !out.ends_with('\n') {
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}
