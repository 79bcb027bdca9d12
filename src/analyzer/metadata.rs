use crate::analyzer::classifier::{Validity, channel_layout_name};
use crate::json::TypedValue;
use chrono::{DateTime, Utc};
use num_rational::BigRational;
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};

/// Summary of the primary video stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub codec_name: Option<String>,
    /// Only set when ffprobe reports a non-empty profile
    pub profile: Option<String>,
    /// Pixel format, e.g. `yuv420p`
    pub colorspace: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bitrate: u64,
    /// Sample aspect ratio as reported, e.g. `1:1`
    pub sar: Option<String>,
    /// Display aspect ratio as reported, e.g. `16:9`
    pub dar: Option<String>,
    /// Average frame rate; `None` when ffprobe reports `0/0`
    #[serde(serialize_with = "serialize_ratio")]
    pub frame_rate: Option<BigRational>,
    /// Rotation from the stream's `rotate` tag, in degrees
    pub rotation: Option<i64>,
    /// One-line description in ffmpeg's style
    pub display: String,
}

/// Summary of the primary audio stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioSummary {
    pub codec_name: Option<String>,
    pub channels: u32,
    pub sample_rate: u32,
    pub bitrate: u64,
    /// Explicit layout from ffprobe, if it gave one
    pub channel_layout: Option<String>,
    pub sample_format: Option<String>,
    pub display: String,
}

impl AudioSummary {
    /// Channel layout, derived from the channel count when ffprobe gave none
    pub fn channel_layout(&self) -> &str {
        self.channel_layout
            .as_deref()
            .unwrap_or_else(|| channel_layout_name(self.channels))
    }
}

/// Metadata for one probed media item.
///
/// Built once from a probe result (see the `ffprobe` module) and never
/// modified afterwards. Only the first video and the first audio stream are
/// summarized; further streams of either kind are still available through
/// [`MediaMetadata::raw`].
#[derive(Debug, Clone, Serialize)]
pub struct MediaMetadata {
    #[serde(skip)]
    pub(crate) raw: TypedValue,
    pub(crate) container: Option<String>,
    pub(crate) duration: f64,
    pub(crate) start_time: f64,
    pub(crate) bitrate: u64,
    pub(crate) creation_time: Option<DateTime<Utc>>,
    pub(crate) video: Option<VideoSummary>,
    pub(crate) audio: Option<AudioSummary>,
    pub(crate) validity: Validity,
}

impl MediaMetadata {
    /// The full coerced probe tree
    pub fn raw(&self) -> &TypedValue {
        &self.raw
    }

    /// Container format name, e.g. `mov,mp4,m4a,3gp,3g2,mj2`
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Duration in seconds; 0 when unknown or when the probe failed
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Start time in seconds
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Overall bitrate in bit/s
    pub fn bitrate(&self) -> u64 {
        self.bitrate
    }

    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.creation_time
    }

    pub fn video(&self) -> Option<&VideoSummary> {
        self.video.as_ref()
    }

    pub fn audio(&self) -> Option<&AudioSummary> {
        self.audio.as_ref()
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }

    pub fn rotation(&self) -> Option<i64> {
        self.video.as_ref().and_then(|v| v.rotation)
    }

    pub fn width(&self) -> Option<u32> {
        self.video.as_ref().and_then(|v| v.width)
    }

    pub fn height(&self) -> Option<u32> {
        self.video.as_ref().and_then(|v| v.height)
    }

    /// `WIDTHxHEIGHT`, or `None` if either dimension is unknown
    pub fn resolution(&self) -> Option<String> {
        self.video.as_ref().and_then(VideoSummary::resolution)
    }

    pub fn audio_channel_layout(&self) -> Option<&str> {
        self.audio.as_ref().map(AudioSummary::channel_layout)
    }

    /// Aspect ratio from the display aspect ratio string.
    ///
    /// A zero result is `None`, and so is a zero height (`4:0`), which would
    /// otherwise be infinite. [`MediaMetadata::calculated_aspect_ratio`] then
    /// falls back to the frame dimensions.
    pub fn aspect_from_dar(&self) -> Option<f64> {
        aspect_from_ratio(self.video.as_ref()?.dar.as_deref())
    }

    /// Aspect ratio from the sample aspect ratio string; zero or infinite is `None`
    pub fn aspect_from_sar(&self) -> Option<f64> {
        aspect_from_ratio(self.video.as_ref()?.sar.as_deref())
    }

    /// `width / height`, when both are known and the result is a real number
    pub fn aspect_from_dimensions(&self) -> Option<f64> {
        let width = self.width()?;
        let height = self.height()?;
        let aspect = f64::from(width) / f64::from(height);
        aspect.is_finite().then_some(aspect)
    }

    /// Display aspect ratio, falling back to the frame dimensions
    pub fn calculated_aspect_ratio(&self) -> Option<f64> {
        self.aspect_from_dar()
            .or_else(|| self.aspect_from_dimensions())
    }

    /// Sample aspect ratio, falling back to square pixels
    pub fn calculated_pixel_aspect_ratio(&self) -> f64 {
        self.aspect_from_sar().unwrap_or(1.0)
    }
}

impl VideoSummary {
    pub fn resolution(&self) -> Option<String> {
        Some(format!("{}x{}", self.width?, self.height?))
    }

    /// Frame rate as frames per second
    pub fn fps(&self) -> Option<f64> {
        let rate = self.frame_rate.as_ref()?;
        Some(rate.numer().to_f64()? / rate.denom().to_f64()?)
    }
}

/// Parse `W:H` into `W / H`.
///
/// Missing or unparseable halves count as 0, so `0:1` and garbage both come
/// out as `None`, as does a zero height.
fn aspect_from_ratio(ratio: Option<&str>) -> Option<f64> {
    let ratio = ratio?;
    let mut parts = ratio.splitn(2, ':');
    let mut next = || {
        parts
            .next()
            .and_then(|p| p.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    let (w, h) = (next(), next());
    let aspect = w / h;
    (aspect.is_finite() && aspect != 0.0).then_some(aspect)
}

fn serialize_ratio<S: Serializer>(
    ratio: &Option<BigRational>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ratio {
        Some(r) => serializer.serialize_str(&format!("{}/{}", r.numer(), r.denom())),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_from_ratio() {
        assert_eq!(aspect_from_ratio(Some("16:9")), Some(16.0 / 9.0));
        assert_eq!(aspect_from_ratio(Some("1:1")), Some(1.0));
        assert_eq!(aspect_from_ratio(Some("0:1")), None);
        assert_eq!(aspect_from_ratio(Some("4:0")), None);
        assert_eq!(aspect_from_ratio(Some("0:0")), None);
        assert_eq!(aspect_from_ratio(Some("N/A")), None);
        assert_eq!(aspect_from_ratio(None), None);
    }

    #[test]
    fn test_audio_channel_layout_fallback() {
        let mut audio = AudioSummary {
            codec_name: Some("aac".to_string()),
            channels: 2,
            sample_rate: 44100,
            bitrate: 0,
            channel_layout: None,
            sample_format: None,
            display: String::new(),
        };
        assert_eq!(audio.channel_layout(), "stereo");

        audio.channel_layout = Some("5.1(side)".to_string());
        assert_eq!(audio.channel_layout(), "5.1(side)");
    }
}
