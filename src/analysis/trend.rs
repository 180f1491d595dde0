use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub x: f64,
    pub y: f64,
}

impl TrendPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Least-squares line drawn between the smallest and largest x of the input.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TrendSegment {
    pub start: TrendPoint,
    pub end: TrendPoint,
    pub slope: f64,
    pub intercept: f64,
}

/// `None` when there are fewer than two points or no x spread.
pub fn fit_line(points: &[TrendPoint]) -> Option<TrendSegment> {
    try_fit_line(points).ok()
}

pub fn try_fit_line(points: &[TrendPoint]) -> Result<TrendSegment, AnalysisError> {
    let n = points.len();
    if n < 2 {
        return Err(AnalysisError::TooFewPoints { needed: 2, got: n });
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        sum_x += p.x;
        sum_y += p.y;
        sum_xy += p.x * p.y;
        sum_xx += p.x * p.x;
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
    }

    if max_x - min_x <= f64::EPSILON * max_x.abs().max(1.0) {
        return Err(AnalysisError::DegenerateFit);
    }

    let n = n as f64;
    let den = n * sum_xx - sum_x * sum_x;
    let slope = (n * sum_xy - sum_x * sum_y) / den;
    if !slope.is_finite() || den.abs() < 1e-12 {
        return Err(AnalysisError::DegenerateFit);
    }
    let intercept = (sum_y - slope * sum_x) / n;

    Ok(TrendSegment {
        start: TrendPoint::new(min_x, slope * min_x + intercept),
        end: TrendPoint::new(max_x, slope * max_x + intercept),
        slope,
        intercept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_line() {
        let points: Vec<TrendPoint> = [1.0, 2.0, 3.0]
            .iter()
            .map(|&x| TrendPoint::new(x, 2.0 * x + 1.0))
            .collect();

        let seg = fit_line(&points).unwrap();
        assert_relative_eq!(seg.start.x, 1.0);
        assert_relative_eq!(seg.start.y, 3.0, epsilon = 1e-9);
        assert_relative_eq!(seg.end.x, 3.0);
        assert_relative_eq!(seg.end.y, 7.0, epsilon = 1e-9);
        assert_relative_eq!(seg.slope, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn endpoints_follow_x_extent_not_input_order() {
        let points = [
            TrendPoint::new(30.0, 0.0),
            TrendPoint::new(10.0, 2.0),
            TrendPoint::new(20.0, 1.0),
        ];
        let seg = fit_line(&points).unwrap();
        assert_eq!(seg.start.x, 10.0);
        assert_eq!(seg.end.x, 30.0);
        assert_relative_eq!(seg.slope, -0.1, epsilon = 1e-9);
    }

    #[test]
    fn too_few_points() {
        assert_eq!(
            try_fit_line(&[TrendPoint::new(1.0, 1.0)]),
            Err(AnalysisError::TooFewPoints { needed: 2, got: 1 })
        );
        assert!(fit_line(&[]).is_none());
    }

    #[test]
    fn vertical_cloud_is_degenerate() {
        let points = [TrendPoint::new(15.0, -1.0), TrendPoint::new(15.0, 2.0)];
        assert_eq!(try_fit_line(&points), Err(AnalysisError::DegenerateFit));
    }
}
