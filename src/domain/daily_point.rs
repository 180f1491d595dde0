use {
    chrono::{Datelike, NaiveDate},
    serde::{Deserialize, Serialize},
};

/// One trading day of an index series. `close` is always > 0.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    pub year: i32,
}

impl DailyPoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close,
            open: None,
            high: None,
            low: None,
            year: date.year(),
        }
    }

    pub fn with_range(mut self, open: Option<f64>, high: Option<f64>, low: Option<f64>) -> Self {
        self.open = open;
        self.high = high;
        self.low = low;
        self
    }
}

/// Sorts ascending by date and keeps the last point seen for any repeated date.
pub fn normalize_series(mut points: Vec<DailyPoint>) -> Vec<DailyPoint> {
    points.retain(|p| p.close.is_finite() && p.close > 0.0);
    points.sort_by_key(|p| p.date);
    points.dedup_by(|later, earlier| {
        if later.date == earlier.date {
            std::mem::swap(later, earlier);
            true
        } else {
            false
        }
    });
    points
}

/// A trading day present in both series, with the day-over-day % change of series B.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPoint {
    pub date: NaiveDate,
    pub vix_close: f64,
    pub spx_close: f64,
    pub spx_change_pct: f64,
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn year_follows_date() {
        assert_eq!(DailyPoint::new(day(2), 13.2).year, 2024);
    }

    #[test]
    fn normalize_sorts_dedups_and_drops_bad_closes() {
        let raw = vec![
            DailyPoint::new(day(3), 14.0),
            DailyPoint::new(day(2), 13.0),
            DailyPoint::new(day(3), 14.5),
            DailyPoint::new(day(4), 0.0),
            DailyPoint::new(day(5), f64::NAN),
        ];
        let clean = normalize_series(raw);
        assert_eq!(clean.len(), 2);
        assert_eq!(clean[0].date, day(2));
        assert_eq!(clean[1].close, 14.5);
    }

    #[test]
    fn daily_point_reads_proxy_json() {
        let json = r#"{"date":"2024-01-02","close":13.2,"high":13.9,"year":2024}"#;
        let point: DailyPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.date, day(2));
        assert_eq!(point.high, Some(13.9));
        assert_eq!(point.low, None);
    }
}
