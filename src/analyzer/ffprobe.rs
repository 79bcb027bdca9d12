use crate::analyzer::classifier::{ValiditySignals, classify};
use crate::analyzer::metadata::{AudioSummary, MediaMetadata, VideoSummary};
use crate::error::{ProbeError, Result};
use crate::json::{TypedValue, coerce, decode_probe_text};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use num_rational::BigRational;
use num_traits::Zero;
use serde_json::Value;
use tracing::{debug, warn};

/// Timestamp layouts seen in `creation_time` tags, tried after RFC 3339
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y:%m:%d %H:%M:%S",
];

impl MediaMetadata {
    /// Build metadata from raw ffprobe stdout and stderr.
    ///
    /// `json` is the output of `ffprobe -print_format json -show_format
    /// -show_streams -show_error`; `diagnostics` is whatever it wrote to stderr.
    pub fn parse(json: &[u8], diagnostics: &str) -> Result<Self> {
        let text = decode_probe_text(json);
        let value: Value = serde_json::from_str(&text)?;
        Self::from_json(&value, diagnostics)
    }

    /// Build metadata from an already parsed JSON tree
    pub fn from_json(value: &Value, diagnostics: &str) -> Result<Self> {
        Self::from_typed(coerce(value)?, diagnostics)
    }

    /// Build metadata from a coerced tree.
    ///
    /// Fails only when the format's `creation_time` tag cannot be parsed.
    /// Every other problem ends up in [`MediaMetadata::validity`].
    pub fn from_typed(raw: TypedValue, diagnostics: &str) -> Result<Self> {
        if raw.contains_key("error") {
            let validity = classify(&ValiditySignals {
                tool_error: true,
                has_stream: false,
                diagnostics,
            });
            warn!(
                "Probe reported an error: {}",
                raw.pointer(&["error", "string"]).map(|v| v.to_string()).unwrap_or_default()
            );
            return Ok(Self {
                raw,
                container: None,
                duration: 0.0,
                start_time: 0.0,
                bitrate: 0,
                creation_time: None,
                video: None,
                audio: None,
                validity,
            });
        }

        let streams = raw.get("streams").and_then(TypedValue::as_array).unwrap_or_default();
        let video = first_stream(streams, "video").map(video_summary);
        let audio = first_stream(streams, "audio").map(audio_summary);
        debug!(
            "Found {} streams, video: {}, audio: {}",
            streams.len(),
            video.as_ref().map(|v| v.display.as_str()).unwrap_or("none"),
            audio.as_ref().map(|a| a.display.as_str()).unwrap_or("none"),
        );

        let format = raw.get("format");
        let field = |key: &str| format.and_then(|f| f.get(key));

        let container = text(field("format_name"));
        let duration = field("duration").and_then(TypedValue::to_f64).unwrap_or(0.0);
        let start_time = field("start_time").and_then(TypedValue::to_f64).unwrap_or(0.0);
        let bitrate = field("bit_rate").and_then(TypedValue::to_u64).unwrap_or(0);
        let creation_time = match format.and_then(|f| f.pointer(&["tags", "creation_time"])) {
            Some(value) if !value.is_null() => Some(parse_creation_time(&value.to_string())?),
            _ => None,
        };

        let validity = classify(&ValiditySignals {
            tool_error: false,
            has_stream: video.is_some() || audio.is_some(),
            diagnostics,
        });
        if !validity.is_valid() {
            warn!("Probe result is not usable: {:?}", validity);
        }

        Ok(Self {
            raw,
            container,
            duration,
            start_time,
            bitrate,
            creation_time,
            video,
            audio,
            validity,
        })
    }
}

/// First stream whose `codec_type` is `kind`; later ones are ignored
fn first_stream<'a>(streams: &'a [TypedValue], kind: &str) -> Option<&'a TypedValue> {
    streams
        .iter()
        .find(|s| s.get("codec_type").and_then(TypedValue::as_str) == Some(kind))
}

fn video_summary(stream: &TypedValue) -> VideoSummary {
    let codec_name = text(stream.get("codec_name"));
    let profile = text(stream.get("profile")).filter(|p| !p.is_empty());
    let colorspace = text(stream.get("pix_fmt"));
    let width = stream.get("width").and_then(TypedValue::to_u32);
    let height = stream.get("height").and_then(TypedValue::to_u32);
    let sar = text(stream.get("sample_aspect_ratio"));
    let dar = text(stream.get("display_aspect_ratio"));

    let resolution = width.zip(height).map(|(w, h)| format!("{}x{}", w, h));
    let aspect = (sar.is_some() || dar.is_some()).then(|| {
        format!(
            "[SAR {} DAR {}]",
            sar.as_deref().unwrap_or_default(),
            dar.as_deref().unwrap_or_default()
        )
    });
    let display = join_present([
        codec_name.clone(),
        profile.as_ref().map(|p| format!("({})", p)),
        codec_tag(stream),
        colorspace.clone(),
        resolution,
        aspect,
    ]);

    VideoSummary {
        codec_name,
        profile,
        colorspace,
        width,
        height,
        bitrate: stream.get("bit_rate").and_then(TypedValue::to_u64).unwrap_or(0),
        sar,
        dar,
        frame_rate: frame_rate(stream.get("avg_frame_rate")),
        rotation: stream.pointer(&["tags", "rotate"]).and_then(TypedValue::to_i64),
        display,
    }
}

fn audio_summary(stream: &TypedValue) -> AudioSummary {
    let mut audio = AudioSummary {
        codec_name: text(stream.get("codec_name")),
        channels: stream.get("channels").and_then(TypedValue::to_u32).unwrap_or(0),
        sample_rate: stream.get("sample_rate").and_then(TypedValue::to_u32).unwrap_or(0),
        bitrate: stream.get("bit_rate").and_then(TypedValue::to_u64).unwrap_or(0),
        channel_layout: text(stream.get("channel_layout")),
        sample_format: text(stream.get("sample_fmt")),
        display: String::new(),
    };

    audio.display = join_present([
        audio.codec_name.clone(),
        codec_tag(stream),
        Some(audio.sample_rate.to_string()),
        Some("Hz".to_string()),
        Some(audio.channel_layout().to_string()),
        audio.sample_format.clone(),
        Some(audio.bitrate.to_string()),
        Some("bit/s".to_string()),
    ]);
    audio
}

/// `0/0` is ffprobe's "unknown". Coercion turns any zero-denominator rate
/// into the integer 0, so `25/0` is unknown too.
fn frame_rate(value: Option<&TypedValue>) -> Option<BigRational> {
    match value? {
        TypedValue::String(s) if s.trim() == "0/0" => None,
        TypedValue::Integer(i) if i.is_zero() => None,
        other => other.to_rational(),
    }
}

/// `(avc1 / 0x31637661)`, or `None` when neither tag is present
fn codec_tag(stream: &TypedValue) -> Option<String> {
    let tag_string = text(stream.get("codec_tag_string"));
    let tag = text(stream.get("codec_tag"));
    if tag_string.is_none() && tag.is_none() {
        return None;
    }
    Some(format!(
        "({} / {})",
        tag_string.unwrap_or_default(),
        tag.unwrap_or_default()
    ))
}

/// Scalar rendered as text; null and missing values are `None`
fn text(value: Option<&TypedValue>) -> Option<String> {
    value.filter(|v| !v.is_null()).map(|v| v.to_string())
}

fn join_present<const N: usize>(parts: [Option<String>; N]) -> String {
    parts.into_iter().flatten().collect::<Vec<_>>().join(" ")
}

fn parse_creation_time(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(time.with_timezone(&Utc));
    }
    if let Ok(time) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Ok(time.with_timezone(&Utc));
    }
    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(time.and_utc());
        }
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_time(chrono::NaiveTime::MIN).and_utc()),
        Err(e) => Err(ProbeError::CreationTime {
            value: value.to_string(),
            message: e.to_string(),
        }),
    }
}
