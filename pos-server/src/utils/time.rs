//! Time helpers
//!
//! Creation timestamps are stored as Unix milliseconds and rendered as
//! RFC 3339 in API output. Calendar arithmetic uses the server's local
//! timezone, matching what cashiers see on the clock.

use chrono::{Local, TimeZone, Utc};

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render Unix milliseconds as an RFC 3339 timestamp in local time.
///
/// A timestamp of zero renders as an empty string; callers filter those
/// records out before display anyway.
pub fn millis_to_rfc3339(millis: i64) -> String {
    if millis == 0 {
        return String::new();
    }
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timestamp_renders_empty() {
        assert_eq!(millis_to_rfc3339(0), "");
    }

    #[test]
    fn now_is_positive() {
        assert!(now_millis() > 0);
    }

    #[test]
    fn rfc3339_roundtrip() {
        let ms = now_millis();
        let rendered = millis_to_rfc3339(ms);
        let parsed = chrono::DateTime::parse_from_rfc3339(&rendered).expect("valid rfc3339");
        assert_eq!(parsed.timestamp_millis(), ms);
    }
}
