pub mod humanize;
pub mod logger;

pub use humanize::{format_bitrate, format_duration};
pub use logger::init_logging;
