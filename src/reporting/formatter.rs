use chrono::{DateTime, Utc};

/// Report timestamp format, e.g. "2026-08-06 14:03:59". Always UTC.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Currency rendering for savings estimates and totals, e.g. "8.35 USD".
/// The only place amounts are rounded.
pub fn format_usd(amount: f64) -> String {
    format!("{:.2} USD", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 6, 14, 3, 59).unwrap();
        assert_eq!(format_timestamp(ts), "2026-08-06 14:03:59");
    }

    #[test]
    fn test_format_timestamp_pads_components() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(ts), "2026-01-02 03:04:05");
    }

    #[test]
    fn test_format_usd_rounds_to_cents() {
        assert_eq!(format_usd(8.352), "8.35 USD");
        assert_eq!(format_usd(10.0), "10.00 USD");
        assert_eq!(format_usd(0.0), "0.00 USD");
        assert_eq!(format_usd(27.359999), "27.36 USD");
    }
}
