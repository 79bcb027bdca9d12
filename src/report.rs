//! Human and machine readable renderings of [`MediaMetadata`].

use crate::analyzer::{MediaMetadata, Validity};
use crate::json::TypedValue;
use crate::utils::{format_bitrate, format_duration};
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    metadata: &'a MediaMetadata,
    resolution: Option<String>,
    aspect_ratio: Option<f64>,
    pixel_aspect_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<&'a TypedValue>,
}

/// Pretty JSON for `metadata`, optionally carrying the whole probe tree
pub fn render_json(metadata: &MediaMetadata, show_raw: bool) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        metadata,
        resolution: metadata.resolution(),
        aspect_ratio: metadata.calculated_aspect_ratio(),
        pixel_aspect_ratio: metadata.calculated_pixel_aspect_ratio(),
        raw: show_raw.then(|| metadata.raw()),
    })
}

/// Multi-line text summary
pub fn render_text(source: &str, metadata: &MediaMetadata, show_raw: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Input: {}", source);

    match metadata.validity() {
        Validity::Valid => out.push_str("  Status: valid\n"),
        Validity::Invalid(reason) => {
            let _ = writeln!(out, "  Status: INVALID ({})", reason);
        }
    }

    let _ = writeln!(
        out,
        "  Container: {}",
        metadata.container().unwrap_or("unknown")
    );
    let _ = writeln!(
        out,
        "  Duration: {}, start: {:.6}, bitrate: {}",
        format_duration(metadata.duration()),
        metadata.start_time(),
        format_bitrate(metadata.bitrate())
    );
    if let Some(created) = metadata.creation_time() {
        let _ = writeln!(out, "  Created: {}", created.to_rfc3339());
    }

    if let Some(video) = metadata.video() {
        let _ = writeln!(out, "  Video: {}", video.display);
        if let Some(fps) = video.fps() {
            let _ = writeln!(out, "    Frame rate: {:.3} fps", fps);
        }
        if let Some(rotation) = video.rotation {
            let _ = writeln!(out, "    Rotation: {} degrees", rotation);
        }
        if let Some(aspect) = metadata.calculated_aspect_ratio() {
            let _ = writeln!(
                out,
                "    Aspect: {:.4} (pixel {:.4})",
                aspect,
                metadata.calculated_pixel_aspect_ratio()
            );
        }
    }

    if let Some(audio) = metadata.audio() {
        let _ = writeln!(out, "  Audio: {}", audio.display);
    }

    if show_raw {
        if let Ok(raw) = serde_json::to_string_pretty(metadata.raw()) {
            let _ = writeln!(out, "  Raw probe data:\n{}", raw);
        }
    }

    out
}
