//! Typed metadata from ffprobe output.
//!
//! ffprobe's JSON writer emits nearly every scalar as a string. This crate
//! restores the real types ([`json::coerce`]) and then extracts a validated
//! [`MediaMetadata`] record from the result, inferring whether the media is
//! usable from both the JSON and ffprobe's stderr.
//!
//! ```no_run
//! use probemeta::MediaMetadata;
//!
//! let stdout = std::fs::read("probe.json")?;
//! let metadata = MediaMetadata::parse(&stdout, "")?;
//! if metadata.is_valid() {
//!     println!("{:?}", metadata.calculated_aspect_ratio());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod json;
pub mod probe;
pub mod report;
pub mod utils;

pub use analyzer::{AudioSummary, InvalidReason, MediaMetadata, Validity, VideoSummary};
pub use error::{ProbeError, Result};
pub use json::{TypedValue, coerce};
