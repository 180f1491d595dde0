use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// `std::time::Instant` on native, a `performance.now()` clock in the browser.
pub use web_time::Instant as AppInstant;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: u64 = 1000;
    pub const SECS_IN_D: i64 = 60 * 60 * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const CBOE_DATE_FORMAT: &str = "%m/%d/%Y";
    pub const LAST_UPDATED_FORMAT: &str = "%H:%M:%S";
}

// Time Helper functions

/// Calendar day (UTC) of a unix timestamp in seconds.
pub fn epoch_sec_to_date(epoch_sec: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(epoch_sec, 0).map(|dt| dt.date_naive())
}

/// Unix seconds at UTC midnight of `date`.
pub fn date_to_epoch_sec(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), TimeUtils::STANDARD_TIME_FORMAT).ok()
}

pub fn parse_cboe_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), TimeUtils::CBOE_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn now_local() -> DateTime<Local> {
    Local::now()
}

pub fn format_last_updated(at: &DateTime<Local>) -> String {
    at.format(TimeUtils::LAST_UPDATED_FORMAT).to_string()
}

pub fn format_duration_ms(ms: u64) -> String {
    let secs = ms / TimeUtils::MS_IN_S;
    if secs < 60 {
        return format!("{}s", secs);
    }
    format!("{}m {}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_round_trips_through_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let secs = date_to_epoch_sec(date);
        assert_eq!(epoch_sec_to_date(secs), Some(date));
        // 14:30 UTC is still the same trading day
        assert_eq!(epoch_sec_to_date(secs + 14 * 3600 + 1800), Some(date));
    }

    #[test]
    fn parses_both_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 9);
        assert_eq!(parse_iso_date("2023-03-09"), expected);
        assert_eq!(parse_cboe_date("03/09/2023"), expected);
        assert_eq!(parse_cboe_date("2023-03-09"), None);
    }

    #[test]
    fn durations_are_short() {
        assert_eq!(format_duration_ms(10_000), "10s");
        assert_eq!(format_duration_ms(75_000), "1m 15s");
    }
}
