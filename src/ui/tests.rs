use std::time::Duration;

use ratatui::layout::Rect;

use super::*;

#[test]
fn format_time_renders_minutes_and_padded_seconds() {
    assert_eq!(format_time(125.0), "2:05");
    assert_eq!(format_time(59.9), "0:59");
    assert_eq!(format_time(3600.0), "60:00");
}

#[test]
fn format_time_degenerate_inputs_are_zero() {
    assert_eq!(format_time(f64::NAN), "0:00");
    assert_eq!(format_time(-4.0), "0:00");
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(f64::INFINITY), "0:00");
}

#[test]
fn progress_ratio_is_clamped_and_tolerates_unknown_duration() {
    let s = Duration::from_secs;
    assert_eq!(progress_ratio(s(30), Some(s(120))), 0.25);
    assert_eq!(progress_ratio(s(200), Some(s(120))), 1.0);
    assert_eq!(progress_ratio(s(30), None), 0.0);
    assert_eq!(progress_ratio(s(30), Some(Duration::ZERO)), 0.0);
}

#[test]
fn volume_text_shows_percentage() {
    assert_eq!(volume_text(VolumeIcon::High, 0.8), "🔊  80%");
    assert_eq!(volume_text(VolumeIcon::Muted, 0.0), "🔇   0%");
}

#[test]
fn bottom_rect_stays_inside_area() {
    let area = Rect::new(0, 10, 40, 5);
    assert_eq!(bottom_rect(3, area), Rect::new(0, 12, 40, 3));
    assert_eq!(bottom_rect(9, area), area);
}

#[test]
fn controls_text_lists_every_shortcut() {
    let text = controls_text();
    for (key, _) in LEGEND {
        assert!(text.contains(&format!("[{key}]")), "missing {key}");
    }
}
