mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::Cli;
use probemeta::config::{AppConfig, ReportFormat};
use probemeta::probe::{ProbeOutput, ProbeRunner};
use probemeta::report::{render_json, render_text};
use probemeta::utils::init_logging;
use std::process::ExitCode;
use tracing::info;

fn main() -> Result<ExitCode> {
    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = init_logging();
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if let Some(binary) = cli.ffprobe.clone() {
        config.ffprobe.binary = binary;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    config.output.show_raw |= cli.raw;
    config.validate()?;

    let (source, output) = match &cli.json {
        Some(json_path) => {
            let output = ProbeOutput::from_files(json_path, cli.stderr.as_deref())
                .with_context(|| format!("Failed to read {}", json_path.display()))?;
            (json_path.display().to_string(), output)
        }
        None => {
            let input = cli.input.clone().context("No input given")?;
            let runner = ProbeRunner::new(config.ffprobe.clone());
            if !runner.is_available() {
                bail!("{} is not available", config.ffprobe.binary);
            }
            let output = runner.run(&input)?;
            (input, output)
        }
    };

    let metadata = output
        .metadata()
        .with_context(|| format!("Failed to read probe output for {}", source))?;
    info!("{}: validity {:?}", source, metadata.validity());

    match config.output.format {
        ReportFormat::Text => print!("{}", render_text(&source, &metadata, config.output.show_raw)),
        ReportFormat::Json => println!("{}", render_json(&metadata, config.output.show_raw)?),
    }

    Ok(if metadata.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
