use clap::Parser;
use probemeta::config::ReportFormat;
use std::path::PathBuf;

/// Print typed metadata for a media file using ffprobe
#[derive(Debug, Parser)]
#[command(name = "probemeta", version, about)]
pub struct Cli {
    /// Media file or URL to probe
    #[arg(required_unless_present = "json")]
    pub input: Option<String>,

    /// Read captured ffprobe JSON instead of running ffprobe
    #[arg(long, value_name = "FILE", conflicts_with = "input")]
    pub json: Option<PathBuf>,

    /// Captured ffprobe stderr to go with --json
    #[arg(long, value_name = "FILE", requires = "json")]
    pub stderr: Option<PathBuf>,

    /// Report format (defaults to the config file setting)
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// ffprobe binary to run (defaults to the config file setting)
    #[arg(long, value_name = "BIN")]
    pub ffprobe: Option<String>,

    /// Include the full coerced probe tree
    #[arg(long)]
    pub raw: bool,
}
