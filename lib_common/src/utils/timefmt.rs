//! Scan timestamp rendering.
//!
//! Notifications carry the wall-clock time of the scan in the operator's
//! timezone, in the `dd/mm/YYYY HH:MM:SS` format the reports have always
//! used.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

const SCAN_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Formats an instant in the given IANA timezone.
///
/// An unparseable timezone name falls back to UTC rather than failing the
/// run; a wrong-looking timestamp beats a dropped notification.
pub fn format_scan_time(instant: DateTime<Utc>, tz_name: &str) -> String {
    match tz_name.parse::<Tz>() {
        Ok(tz) => instant.with_timezone(&tz).format(SCAN_TIME_FORMAT).to_string(),
        Err(_) => instant.format(SCAN_TIME_FORMAT).to_string(),
    }
}

/// The current scan timestamp in the given timezone.
pub fn scan_timestamp(tz_name: &str) -> String {
    format_scan_time(Utc::now(), tz_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_in_sao_paulo_time() {
        // Brazil has no DST since 2019, so Sao Paulo is UTC-3 year round.
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(
            format_scan_time(instant, "America/Sao_Paulo"),
            "15/01/2024 09:00:00"
        );
    }

    #[test]
    fn unknown_timezone_falls_back_to_utc() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 23, 30, 5).unwrap();
        assert_eq!(
            format_scan_time(instant, "Not/AZone"),
            "01/06/2024 23:30:05"
        );
    }
}
