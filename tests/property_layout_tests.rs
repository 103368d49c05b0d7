use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use fleet_gantt::core::{ColorToken, DisplayTimeZone, TimeInterval, TimeWindow, TimelineRow};
use fleet_gantt::render::{LayoutConfig, compute_layout, time_markers};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()
}

fn single_row(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<TimelineRow> {
    let interval = TimeInterval::new(
        "A-1",
        "HKG-NRT",
        start,
        end,
        "",
        ColorToken::new("#3b82f6").expect("color"),
    )
    .expect("interval");
    vec![TimelineRow::new("A", "A").with_intervals(vec![interval])]
}

proptest! {
    #[test]
    fn bars_inside_window_stay_within_unit_range(
        window_minutes in 60i64..(7 * 24 * 60),
        start_factor in 0.0f64..1.0,
        length_factor in 0.0f64..1.0
    ) {
        let window = TimeWindow::new(base(), base() + Duration::minutes(window_minutes))
            .expect("window");
        let offset = (window_minutes as f64 * start_factor) as i64;
        let length = ((window_minutes - offset) as f64 * length_factor) as i64;
        let start = base() + Duration::minutes(offset);
        let end = start + Duration::minutes(length);

        let outcome = compute_layout(window, &single_row(start, end), LayoutConfig::default())
            .expect("layout");
        let bar = &outcome.layout().expect("laid out").rows[0].bars[0];

        prop_assert!(bar.left_fraction >= 0.0);
        prop_assert!(bar.left_fraction <= 1.0);
        // Only the width floor can push a fully contained bar past the edge.
        prop_assert!(bar.right_fraction() <= 1.0 + LayoutConfig::default().width_floor + 1e-12);
    }

    #[test]
    fn width_never_drops_below_floor(
        window_minutes in 1i64..(7 * 24 * 60),
        start_offset in -1_000i64..20_000,
        length_seconds in 0i64..600,
        floor in 0.0001f64..0.2
    ) {
        let window = TimeWindow::new(base(), base() + Duration::minutes(window_minutes))
            .expect("window");
        let start = base() + Duration::minutes(start_offset);
        let end = start + Duration::seconds(length_seconds);
        let config = LayoutConfig::default().with_width_floor(floor);

        let outcome = compute_layout(window, &single_row(start, end), config).expect("layout");
        let bar = &outcome.layout().expect("laid out").rows[0].bars[0];
        prop_assert!(bar.width_fraction >= floor);
        prop_assert!(bar.left_fraction >= 0.0);
    }

    #[test]
    fn markers_are_three_hours_apart_on_multiples_of_three(
        start_minutes in 0i64..(365 * 24 * 60),
        window_minutes in 1i64..(7 * 24 * 60)
    ) {
        let start = base() + Duration::minutes(start_minutes);
        let window = TimeWindow::new(start, start + Duration::minutes(window_minutes))
            .expect("window");
        let markers = time_markers(window, 3, DisplayTimeZone::Utc).expect("markers");

        if let Some(first) = markers.first() {
            prop_assert_eq!(first.instant.hour() % 3, 0);
            prop_assert_eq!(first.instant.minute(), 0);
        }
        for pair in markers.windows(2) {
            prop_assert_eq!(pair[1].instant - pair[0].instant, Duration::hours(3));
        }
        for marker in &markers {
            prop_assert!(marker.instant <= window.end());
            prop_assert!((0.0..=1.0).contains(&marker.fraction));
        }
    }
}
