use crate::analyzer::MediaMetadata;
use crate::config::FfprobeConfig;
use crate::error::{ProbeError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Captured output of one ffprobe run
#[derive(Debug, Clone, Default)]
pub struct ProbeOutput {
    /// JSON written to stdout, as raw bytes
    pub stdout: Vec<u8>,
    /// Diagnostics written to stderr
    pub stderr: String,
}

impl ProbeOutput {
    /// Read a previously captured run from disk. A missing stderr file means
    /// the run printed no diagnostics.
    pub fn from_files(json_path: &Path, stderr_path: Option<&Path>) -> Result<Self> {
        let stdout = std::fs::read(json_path)?;
        let stderr = match stderr_path {
            Some(path) => String::from_utf8_lossy(&std::fs::read(path)?).into_owned(),
            None => String::new(),
        };
        Ok(Self { stdout, stderr })
    }

    /// Turn the captured run into metadata
    pub fn metadata(&self) -> Result<MediaMetadata> {
        MediaMetadata::parse(&self.stdout, &self.stderr)
    }
}

/// Runs ffprobe against a media file or URL
#[derive(Debug, Clone)]
pub struct ProbeRunner {
    config: FfprobeConfig,
}

impl ProbeRunner {
    pub fn new(config: FfprobeConfig) -> Self {
        Self { config }
    }

    /// Check the configured binary responds to `-version`
    pub fn is_available(&self) -> bool {
        Command::new(&self.config.binary)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }

    /// Arguments for probing `input`
    pub fn args(&self, input: &str) -> Vec<String> {
        let mut args = self.config.extra_args.clone();
        args.extend(
            [
                "-i",
                input,
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "-show_error",
                "-hide_banner",
            ]
            .map(String::from),
        );
        args
    }

    /// Probe `input` and capture both output streams.
    ///
    /// A non-zero exit status is not an error here: ffprobe describes the
    /// failure in its `error` object, which metadata extraction handles.
    pub fn run(&self, input: &str) -> Result<ProbeOutput> {
        if !is_url(input) && !Path::new(input).exists() {
            return Err(ProbeError::InputNotFound(input.to_string()));
        }

        let args = self.args(input);
        debug!("Running {} {}", self.config.binary, args.join(" "));

        let output = Command::new(&self.config.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ProbeError::Probe(format!("Failed to execute {}: {}", self.config.binary, e))
            })?;

        info!("Probed {} (exit status {})", input, output.status);
        Ok(ProbeOutput {
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// `scheme://...` inputs are handed to ffprobe without an existence check
fn is_url(input: &str) -> bool {
    input.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let runner = ProbeRunner::new(FfprobeConfig {
            binary: "ffprobe".to_string(),
            extra_args: vec!["-analyzeduration".to_string(), "100M".to_string()],
        });
        assert_eq!(
            runner.args("movie.mp4"),
            vec![
                "-analyzeduration",
                "100M",
                "-i",
                "movie.mp4",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "-show_error",
                "-hide_banner",
            ]
        );
    }

    #[test]
    fn test_url_detection() {
        assert!(is_url("http://example.com/a.mp4"));
        assert!(is_url("rtmp+tls://host/live"));
        assert!(!is_url("/tmp/movie.mp4"));
        assert!(!is_url("://nothing"));
        assert!(!is_url("C:\\videos\\a.mp4"));
    }

    #[test]
    fn test_missing_input() {
        let runner = ProbeRunner::new(FfprobeConfig::default());
        let err = runner.run("/definitely/not/here.mkv").unwrap_err();
        assert!(matches!(err, ProbeError::InputNotFound(_)));
    }

    #[test]
    fn test_output_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("probe.json");
        let stderr_path = dir.path().join("probe.err");
        std::fs::write(
            &json_path,
            r#"{"streams": [{"codec_type": "audio", "codec_name": "flac", "channels": "1"}], "format": {"duration": "3.5"}}"#,
        )
        .unwrap();
        std::fs::write(&stderr_path, "").unwrap();

        let output = ProbeOutput::from_files(&json_path, Some(&stderr_path)).unwrap();
        let meta = output.metadata().unwrap();
        assert!(meta.is_valid());
        assert_eq!(meta.duration(), 3.5);
        assert_eq!(meta.audio_channel_layout(), Some("mono"));

        let without_stderr = ProbeOutput::from_files(&json_path, None).unwrap();
        assert!(without_stderr.stderr.is_empty());
    }
}
