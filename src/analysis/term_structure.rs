use {serde::Serialize, strum_macros::Display};

use crate::{
    config::PROVIDER,
    domain::{FuturesPoint, TimeRange},
    utils::round_to,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum CurveShape {
    Contango,
    Backwardation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermStructureSummary {
    pub spot: Option<f64>,
    pub m1: f64,
    pub m2: f64,
    /// M2 - M1
    pub spread: f64,
    pub shape: CurveShape,
}

fn price_of(points: &[FuturesPoint], month: &str) -> Option<f64> {
    points.iter().find(|p| p.month == month).map(|p| p.price)
}

/// Spread and shape from the first two contract months. A missing month reads as 0.
pub fn summarize(points: &[FuturesPoint]) -> TermStructureSummary {
    let m1 = price_of(points, "M1").unwrap_or(0.0);
    let m2 = price_of(points, "M2").unwrap_or(0.0);
    TermStructureSummary {
        spot: points.iter().find(|p| p.is_spot()).map(|p| p.price),
        m1,
        m2,
        spread: m2 - m1,
        shape: if m2 >= m1 {
            CurveShape::Contango
        } else {
            CurveShape::Backwardation
        },
    }
}

/// Placeholder contracts stepping up from spot; used when no contract quote resolves.
pub fn synthesize_contracts(spot: Option<f64>) -> Vec<FuturesPoint> {
    let cfg = &PROVIDER.futures;
    let base = spot.filter(|s| *s > 0.0).unwrap_or(cfg.fallback_base);
    (1..=cfg.fallback_months)
        .map(|i| {
            FuturesPoint::contract(
                i,
                round_to(base + i as f64 * cfg.fallback_step, cfg.price_decimals),
            )
        })
        .collect()
}

pub fn illustrative_curve(range: TimeRange) -> Vec<FuturesPoint> {
    range
        .illustrative_prices()
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            if i == 0 {
                FuturesPoint::spot(price)
            } else {
                FuturesPoint::contract(i, price)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn upward_curve_is_contango() {
        let s = summarize(&illustrative_curve(TimeRange::OneYear));
        assert_eq!(s.spot, Some(14.5));
        assert_relative_eq!(s.spread, 0.9, epsilon = 1e-9);
        assert_eq!(s.shape, CurveShape::Contango);
    }

    #[test]
    fn inverted_curve_is_backwardation() {
        let s = summarize(&illustrative_curve(TimeRange::OneMonth));
        assert!(s.spread < 0.0);
        assert_eq!(s.shape, CurveShape::Backwardation);
    }

    #[test]
    fn missing_months_read_as_zero() {
        let s = summarize(&[FuturesPoint::spot(18.0)]);
        assert_eq!((s.m1, s.m2), (0.0, 0.0));
        assert_eq!(s.shape, CurveShape::Contango);
    }

    #[test]
    fn synthetic_contracts_step_from_spot() {
        let curve = synthesize_contracts(Some(20.0));
        assert_eq!(curve.len(), 7);
        assert_eq!(curve[0], FuturesPoint::contract(1, 20.5));
        assert_eq!(curve[6].month, "M7");
        assert_relative_eq!(curve[6].price, 23.5);

        let without_spot = synthesize_contracts(None);
        assert_relative_eq!(without_spot[0].price, 15.5);
    }

    #[test]
    fn illustrative_curve_labels() {
        let months: Vec<String> = illustrative_curve(TimeRange::All)
            .into_iter()
            .map(|p| p.month)
            .collect();
        assert_eq!(months, ["Spot", "M1", "M2", "M3", "M4", "M5", "M6", "M7"]);
    }
}
