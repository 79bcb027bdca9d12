pub mod classifier;
pub mod ffprobe;
pub mod metadata;

pub use classifier::{InvalidReason, Validity, channel_layout_name};
pub use metadata::{AudioSummary, MediaMetadata, VideoSummary};
