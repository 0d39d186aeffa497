/// `m:ss`, as shown on the countdown and in result rows.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Backend timestamps come without a zone (`2024-05-01T09:30:00`); keep the
/// calendar part and the minutes.
#[must_use]
pub fn format_backend_date(raw: &str) -> String {
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_or_else(|_| raw.to_string(), |value| value.format("%Y-%m-%d %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn backend_dates_are_shortened_or_passed_through() {
        assert_eq!(format_backend_date("2024-05-01T09:30:00"), "2024-05-01 09:30");
        assert_eq!(format_backend_date("2024-05-01T09:30:00.123456"), "2024-05-01 09:30");
        assert_eq!(format_backend_date("yesterday"), "yesterday");
    }
}
