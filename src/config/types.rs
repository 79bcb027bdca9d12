use serde::{Deserialize, Serialize};

/// How the ffprobe binary is invoked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfprobeConfig {
    /// Binary name or full path
    pub binary: String,
    /// Extra arguments placed before the input, e.g. `["-analyzeduration", "100M"]`
    pub extra_args: Vec<String>,
}

impl Default for FfprobeConfig {
    fn default() -> Self {
        Self {
            binary: "ffprobe".to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// Report format for the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ReportFormat,
    /// Include the full coerced probe tree in reports
    pub show_raw: bool,
}
