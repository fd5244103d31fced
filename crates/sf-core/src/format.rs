//! Display formatting for elapsed time and durations.

/// Formats a stopwatch reading as `H:MM:SS` from one hour up, `M:SS` below.
/// Negative readings display as `0:00`.
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Formats minutes as duration string.
/// Returns "Xh Ym" if >= 1 hour, "Ym" if < 1 hour.
/// Negative durations are treated as 0m.
pub fn format_duration(total_minutes: i64) -> String {
    if total_minutes < 0 {
        return "0m".to_string();
    }
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
