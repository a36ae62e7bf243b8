//! Duration rendering and timecode formatting.
//!
//! `to_human_readable` is presentational (log lines, benchmark tables);
//! the timestamp formatters produce the exact grammars the vtt and srt
//! codecs prescribe.

/// Renders a millisecond duration with its two largest non-zero units,
/// e.g. `3_660_000` becomes `"1h 1m"` and `61_500` becomes `"1m 1s"`.
pub fn to_human_readable(duration_ms: u64) -> String {
    const UNITS: &[(&str, u64)] = &[("h", 3_600_000), ("m", 60_000), ("s", 1_000), ("ms", 1)];

    let mut remainder = duration_ms;
    let mut parts = Vec::with_capacity(2);

    for (suffix, factor) in UNITS {
        let value = remainder / factor;
        remainder %= factor;

        if value > 0 {
            parts.push(format!("{value}{suffix}"));
        }
        if parts.len() == 2 {
            break;
        }
    }

    if parts.is_empty() {
        return "0ms".to_string();
    }

    parts.join(" ")
}

/// Formats a duration in seconds as a second-precision `HH:MM:SS`
/// timecode. The sub-second remainder is truncated, not rounded.
pub fn to_timecode(seconds: f64) -> String {
    let total = seconds.max(0.0).trunc() as u64;

    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Millisecond-precision cue timestamp in the WebVTT grammar: `MM:SS.mmm`,
/// widening to `HH:MM:SS.mmm` once an hour is reached.
pub fn to_vtt_timestamp(duration_ms: u64) -> String {
    let (hours, minutes, seconds, millis) = split_ms(duration_ms);

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
    } else {
        format!("{minutes:02}:{seconds:02}.{millis:03}")
    }
}

/// Millisecond-precision cue timestamp in the SubRip grammar: `HH:MM:SS,mmm`.
pub fn to_srt_timestamp(duration_ms: u64) -> String {
    let (hours, minutes, seconds, millis) = split_ms(duration_ms);

    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}

fn split_ms(duration_ms: u64) -> (u64, u64, u64, u64) {
    let total_seconds = duration_ms / 1_000;

    (
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60,
        duration_ms % 1_000,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_readable_single_unit() {
        assert_eq!(to_human_readable(60_000), "1m");
        assert_eq!(to_human_readable(1_000), "1s");
        assert_eq!(to_human_readable(999), "999ms");
    }

    #[test]
    fn test_human_readable_two_largest_units() {
        assert_eq!(to_human_readable(3_660_000), "1h 1m");
        assert_eq!(to_human_readable(61_500), "1m 1s");
        // A zero unit in between is skipped, not rendered as "0m".
        assert_eq!(to_human_readable(3_600_500), "1h 500ms");
    }

    #[test]
    fn test_human_readable_zero() {
        assert_eq!(to_human_readable(0), "0ms");
    }

    #[test]
    fn test_timecode_truncates_subseconds() {
        assert_eq!(to_timecode(60.41545), "00:01:00");
        assert_eq!(to_timecode(3600.0), "01:00:00");
        assert_eq!(to_timecode(0.999), "00:00:00");
    }

    #[test]
    fn test_vtt_timestamp() {
        assert_eq!(to_vtt_timestamp(0), "00:00.000");
        assert_eq!(to_vtt_timestamp(61_123), "01:01.123");
        assert_eq!(to_vtt_timestamp(3_661_005), "01:01:01.005");
    }

    #[test]
    fn test_srt_timestamp() {
        assert_eq!(to_srt_timestamp(0), "00:00:00,000");
        assert_eq!(to_srt_timestamp(61_123), "00:01:01,123");
        assert_eq!(to_srt_timestamp(3_661_005), "01:01:01,005");
    }
}
