const MS_PER_SECOND: u64 = 1_000;
const SECONDS_PER_DAY: u64 = 86_400;

/// Time of day for an epoch-millisecond timestamp as `HH:MM:SS UTC`.
pub fn format_utc_time(timestamp_ms: u64) -> String {
    let seconds = (timestamp_ms / MS_PER_SECOND) % SECONDS_PER_DAY;
    format!(
        "{:02}:{:02}:{:02} UTC",
        seconds / 3_600,
        (seconds % 3_600) / 60,
        seconds % 60
    )
}
