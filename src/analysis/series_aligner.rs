use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{
    config::{ANALYSIS, DF},
    domain::{CorrelationPoint, DailyPoint},
    utils::round_to,
};

/// Inner-joins two ascending daily series on date.
///
/// Output follows `series_a` order and keeps only dates present in both. `spx_change_pct` is the
/// % change of B's close against the previous *emitted* B close (so a day missing from A is
/// skipped over, not counted), rounded to 4 decimals; the first emitted point gets 0.
/// Duplicate dates in B resolve to the last one seen.
pub fn align(series_a: &[DailyPoint], series_b: &[DailyPoint]) -> Vec<CorrelationPoint> {
    let closes_b: HashMap<NaiveDate, f64> = series_b.iter().map(|p| (p.date, p.close)).collect();

    let mut prev_b: Option<f64> = None;
    let aligned: Vec<CorrelationPoint> = series_a
        .iter()
        .filter_map(|a| {
            let b_close = *closes_b.get(&a.date)?;
            let change = match prev_b {
                Some(prev) if prev != 0.0 => round_to(
                    (b_close - prev) / prev * 100.0,
                    ANALYSIS.correlation.change_decimals,
                ),
                _ => 0.0,
            };
            prev_b = Some(b_close);
            Some(CorrelationPoint {
                date: a.date,
                vix_close: a.close,
                spx_close: b_close,
                spx_change_pct: change,
                year: a.year,
            })
        })
        .collect();

    #[cfg(debug_assertions)]
    if DF.log_alignment {
        log::info!(
            "ALIGN: {} x {} -> {} matched days",
            series_a.len(),
            series_b.len(),
            aligned.len()
        );
    }

    aligned
}
