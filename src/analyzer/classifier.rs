use serde::Serialize;

/// Why a probe result cannot be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// ffprobe reported an `error` object
    ToolError,
    /// No decodable stream and ffprobe complained about the codec
    UnsupportedCodec,
    /// ffprobe said some part of the input "is not supported"
    NotSupported,
    /// ffprobe could not determine codec parameters
    MissingCodecParameters,
}

impl InvalidReason {
    pub fn description(&self) -> &'static str {
        match self {
            InvalidReason::ToolError => "probe reported an error",
            InvalidReason::UnsupportedCodec => "unsupported codec and no usable streams",
            InvalidReason::NotSupported => "input is not supported",
            InvalidReason::MissingCodecParameters => "could not find codec parameters",
        }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Whether probed media decoded well enough to trust its metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Validity {
    Valid,
    Invalid(InvalidReason),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

/// Everything the validity decision looks at
#[derive(Debug, Clone, Copy)]
pub struct ValiditySignals<'a> {
    /// The probe JSON has a top-level `error` key
    pub tool_error: bool,
    /// A video or audio summary was built
    pub has_stream: bool,
    /// Raw stderr of the probe run
    pub diagnostics: &'a str,
}

type Check = fn(&ValiditySignals<'_>) -> bool;

/// Independent failure checks. Any single match makes the media invalid;
/// the first one that matches is reported.
const CHECKS: &[(InvalidReason, Check)] = &[
    (InvalidReason::ToolError, |s| s.tool_error),
    (InvalidReason::UnsupportedCodec, |s| {
        !s.has_stream && s.diagnostics.contains("Unsupported codec")
    }),
    (InvalidReason::NotSupported, |s| {
        s.diagnostics.contains("is not supported")
    }),
    (InvalidReason::MissingCodecParameters, |s| {
        s.diagnostics.contains("could not find codec parameters")
    }),
];

/// Decide validity from the collected signals
pub fn classify(signals: &ValiditySignals<'_>) -> Validity {
    CHECKS
        .iter()
        .find(|(_, check)| check(signals))
        .map(|(reason, _)| Validity::Invalid(*reason))
        .unwrap_or(Validity::Valid)
}

/// Layout name ffprobe would give a bare channel count
pub fn channel_layout_name(channels: u32) -> &'static str {
    match channels {
        1 => "mono",
        2 => "stereo",
        6 => "5.1",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(tool_error: bool, has_stream: bool, diagnostics: &str) -> ValiditySignals<'_> {
        ValiditySignals {
            tool_error,
            has_stream,
            diagnostics,
        }
    }

    #[test]
    fn test_clean_probe_is_valid() {
        assert_eq!(classify(&signals(false, true, "")), Validity::Valid);
        assert_eq!(classify(&signals(false, false, "")), Validity::Valid);
    }

    #[test]
    fn test_tool_error_wins() {
        assert_eq!(
            classify(&signals(true, true, "is not supported")),
            Validity::Invalid(InvalidReason::ToolError)
        );
    }

    #[test]
    fn test_unsupported_codec_needs_missing_streams() {
        let stderr = "[mov] Unsupported codec with id 0 for input stream 2";
        assert_eq!(classify(&signals(false, true, stderr)), Validity::Valid);
        assert_eq!(
            classify(&signals(false, false, stderr)),
            Validity::Invalid(InvalidReason::UnsupportedCodec)
        );
    }

    #[test]
    fn test_diagnostic_phrases() {
        assert_eq!(
            classify(&signals(false, true, "Stream #0: codec frame size is not supported")),
            Validity::Invalid(InvalidReason::NotSupported)
        );
        assert_eq!(
            classify(&signals(
                false,
                true,
                "could not find codec parameters for stream 0 (Video: none)"
            )),
            Validity::Invalid(InvalidReason::MissingCodecParameters)
        );
    }

    #[test]
    fn test_channel_layout_names() {
        assert_eq!(channel_layout_name(1), "mono");
        assert_eq!(channel_layout_name(2), "stereo");
        assert_eq!(channel_layout_name(6), "5.1");
        assert_eq!(channel_layout_name(8), "unknown");
        assert_eq!(channel_layout_name(0), "unknown");
    }
}
