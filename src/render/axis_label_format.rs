use chrono::{DateTime, FixedOffset};

use crate::core::{DisplayTimeZone, TimeWindow};

/// 24-hour `HHMM` label, e.g. `0600`.
#[must_use]
pub fn format_marker_label(local: DateTime<FixedOffset>) -> String {
    local.format("%H%M").to_string()
}

/// Header caption for a window, e.g. `Jan 01 00:00 - Jan 03 23:59`.
#[must_use]
pub fn format_window_caption(window: TimeWindow, timezone: DisplayTimeZone) -> String {
    let start = timezone.to_local(window.start()).format("%b %d %H:%M");
    let end = timezone.to_local(window.end()).format("%b %d %H:%M");
    format!("{start} - {end}")
}

#[cfg(test)]
mod tests {
    use super::{format_marker_label, format_window_caption};
    use crate::core::{DisplayTimeZone, TimeWindow};
    use chrono::{TimeZone, Utc};

    #[test]
    fn marker_label_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(2022, 1, 1, 6, 0, 0).unwrap();
        assert_eq!(format_marker_label(DisplayTimeZone::Utc.to_local(at)), "0600");
    }

    #[test]
    fn caption_uses_display_timezone() {
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 1, 3, 23, 59, 59).unwrap(),
        )
        .expect("window");
        assert_eq!(
            format_window_caption(window, DisplayTimeZone::Utc),
            "Jan 01 00:00 - Jan 03 23:59"
        );
        assert_eq!(
            format_window_caption(window, DisplayTimeZone::FixedOffsetMinutes { minutes: 60 }),
            "Jan 01 01:00 - Jan 04 00:59"
        );
    }
}
