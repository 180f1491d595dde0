/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Element at index `n / 2` of the sorted values (the upper median for even counts).
pub fn upper_median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted[sorted.len() / 2]
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn pct_of(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn median_takes_upper_middle() {
        assert_eq!(upper_median(&[18.0, 12.0, 16.0, 14.0]), 16.0);
        assert_eq!(upper_median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(upper_median(&[]), 0.0);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_relative_eq!(mean(&[12.0, 14.0, 16.0, 18.0]), 15.0);
    }

    #[test]
    fn rounding_to_four_places() {
        assert_relative_eq!(round_to(1.234_567, 4), 1.2346);
        assert_relative_eq!(round_to(-0.000_04, 4), -0.0);
    }
}
