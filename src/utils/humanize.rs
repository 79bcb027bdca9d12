/// Format seconds as `HH:MM:SS.cc`
pub fn format_duration(seconds: f64) -> String {
    let total_centis = (seconds.max(0.0) * 100.0).round() as u64;
    let hours = total_centis / 360_000;
    let minutes = (total_centis / 6_000) % 60;
    let secs = (total_centis / 100) % 60;
    let centis = total_centis % 100;
    format!("{:02}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
}

/// Get bitrate display string
pub fn format_bitrate(bits_per_second: u64) -> String {
    if bits_per_second == 0 {
        "N/A".to_string()
    } else if bits_per_second >= 1_000_000 {
        format!("{:.1} Mb/s", bits_per_second as f64 / 1_000_000.0)
    } else {
        format!("{} kb/s", bits_per_second / 1000)
    }
}
