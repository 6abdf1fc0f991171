//! Display formatting for route summaries.

/// Formats a travel duration rounded to whole minutes: "N min" below one
/// hour, "H h M min" from one hour on. The minutes are dropped when they are
/// zero, so 7200 s reads "2 h".
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds.max(0.0) / 60.0).round() as u64;
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let (hours, rest) = (minutes / 60, minutes % 60);
    if rest == 0 {
        format!("{hours} h")
    } else {
        format!("{hours} h {rest} min")
    }
}

/// Formats a distance: whole meters below 1 km, kilometres to one decimal above.
pub fn format_distance(meters: f64) -> String {
    let meters = meters.max(0.0).round();
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Routes are labelled by position only; the service puts the fastest first.
pub fn route_label(index: usize) -> String {
    match index {
        0 => "Fastest".to_string(),
        n => format!("Alternative {n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_minutes() {
        assert_eq!(format_duration(600.0), "10 min");
        assert_eq!(format_duration(0.0), "0 min");
        assert_eq!(format_duration(89.0), "1 min");
    }

    #[test]
    fn test_duration_hours() {
        assert_eq!(format_duration(3600.0), "1 h");
        assert_eq!(format_duration(5400.0), "1 h 30 min");
        // 59 min 40 s rounds up to a full hour
        assert_eq!(format_duration(3580.0), "1 h");
        assert_eq!(format_duration(4.0 * 3600.0 + 5.0 * 60.0), "4 h 5 min");
    }

    #[test]
    fn test_distance() {
        assert_eq!(format_distance(850.0), "850 m");
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(1000.0), "1.0 km");
        assert_eq!(format_distance(12_340.0), "12.3 km");
    }

    #[test]
    fn test_route_label() {
        assert_eq!(route_label(0), "Fastest");
        assert_eq!(route_label(2), "Alternative 2");
    }
}
