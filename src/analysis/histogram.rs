use std::fmt;

use {itertools::Itertools, serde::Serialize};

use crate::{
    config::{ANALYSIS, DF},
    domain::{BinWidth, DailyPoint},
    utils::{mean, pct_of, upper_median},
};

/// Absorbs representation error before flooring, e.g. 12.3 * 10 = 123.00000000000001.
const SNAP: f64 = 1e-9;

/// Share of the windowed days at or above a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TailShare {
    Percent(f64),
    /// Non-zero but below the display threshold.
    BelowThreshold,
}

impl TailShare {
    fn from_pct(pct: f64) -> Self {
        if pct > 0.0 && pct < ANALYSIS.histogram.tail_threshold_pct {
            Self::BelowThreshold
        } else {
            Self::Percent(pct)
        }
    }
}

impl fmt::Display for TailShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(pct) => write!(f, "{:.1}", pct),
            Self::BelowThreshold => write!(f, "<{}", ANALYSIS.histogram.tail_threshold_pct),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    /// Lower edge formatted with the bin width's precision; doubles as the key.
    pub label: String,
    pub lower: f64,
    pub count: usize,
    pub tail: TailShare,
}

/// Labelled x-axis position, addressed by bucket index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisTick {
    pub index: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bin_width: BinWidth,
    /// Contiguous from the bucket holding the minimum to the one holding the maximum.
    pub buckets: Vec<Bucket>,
    pub mean: f64,
    pub median: f64,
    /// Ascending by index; each label equals its bucket's label.
    pub ticks: Vec<AxisTick>,
    pub total: usize,
}

impl Histogram {
    pub fn empty(bin_width: BinWidth) -> Self {
        Self {
            bin_width,
            buckets: Vec::new(),
            mean: 0.0,
            median: 0.0,
            ticks: Vec::new(),
            total: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Position of the bucket containing `value`, if it falls inside the populated range.
    pub fn bucket_index_of(&self, value: f64) -> Option<usize> {
        let first = self.buckets.first()?;
        let k0 = bucket_floor(first.lower, self.bin_width);
        let idx = bucket_floor(value, self.bin_width) - k0;
        usize::try_from(idx).ok().filter(|&i| i < self.buckets.len())
    }

    /// Fractional bucket position for placing a marker line at an arbitrary value.
    pub fn position_of(&self, value: f64) -> Option<f64> {
        let first = self.buckets.first()?;
        Some((value - first.lower) / self.bin_width.value())
    }

    pub fn tick_labels(&self) -> impl Iterator<Item = &str> {
        self.ticks.iter().map(|t| t.label.as_str())
    }
}

fn bucket_floor(value: f64, width: BinWidth) -> i64 {
    (value * 10.0 / width.tenths() as f64 + SNAP).floor() as i64
}

fn bucket_ceil(value: f64, width: BinWidth) -> i64 {
    (value * 10.0 / width.tenths() as f64 - SNAP).ceil() as i64
}

fn bucket_lower(k: i64, width: BinWidth) -> f64 {
    (k * width.tenths()) as f64 / 10.0
}

fn tick_step(span: f64) -> i64 {
    let cfg = &ANALYSIS.histogram;
    if span < cfg.span_small {
        cfg.tick_step_small
    } else if span < cfg.span_medium {
        cfg.tick_step_medium
    } else if span > cfg.span_wide {
        cfg.tick_step_wide
    } else {
        cfg.tick_step_default
    }
}

/// Ticks on integer VIX levels every `step` units, kept only where a bucket starts.
fn ticks(k_min: i64, k_max: i64, width: BinWidth) -> Vec<AxisTick> {
    let min_lower = bucket_lower(k_min, width);
    let max_lower = bucket_lower(k_max, width);
    let step = tick_step(max_lower - min_lower);
    let per_unit = 10 / width.tenths();

    (min_lower.floor() as i64..=max_lower.ceil() as i64)
        .filter(|level| level.rem_euclid(step) == 0)
        .filter_map(|level| {
            let k = level * per_unit;
            let index = usize::try_from(k - k_min).ok().filter(|_| k <= k_max)?;
            Some(AxisTick {
                index,
                label: width.format(level as f64),
            })
        })
        .collect()
}

pub fn histogram(points: &[DailyPoint], bin_width: BinWidth) -> Histogram {
    let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
    histogram_of_values(&closes, bin_width)
}

pub fn histogram_of_values(values: &[f64], bin_width: BinWidth) -> Histogram {
    let Some((min, max)) = values.iter().copied().minmax().into_option() else {
        return Histogram::empty(bin_width);
    };

    let k_min = bucket_floor(min, bin_width);
    let k_max = bucket_ceil(max, bin_width).max(k_min);
    let mut counts = vec![0usize; (k_max - k_min + 1) as usize];
    for &v in values {
        let idx = (bucket_floor(v, bin_width) - k_min).clamp(0, k_max - k_min);
        counts[idx as usize] += 1;
    }

    let total = values.len();
    let mut tails = vec![TailShare::Percent(0.0); counts.len()];
    let mut at_or_above = 0;
    for (i, &count) in counts.iter().enumerate().rev() {
        at_or_above += count;
        tails[i] = TailShare::from_pct(pct_of(at_or_above, total));
    }

    let buckets: Vec<Bucket> = counts
        .iter()
        .zip(tails)
        .enumerate()
        .map(|(i, (&count, tail))| {
            let lower = bucket_lower(k_min + i as i64, bin_width);
            Bucket {
                label: bin_width.format(lower),
                lower,
                count,
                tail,
            }
        })
        .collect();

    let ticks = ticks(k_min, k_max, bin_width);

    #[cfg(debug_assertions)]
    if DF.log_histogram {
        log::info!(
            "HISTOGRAM: {} values, w={} -> {} buckets [{} .. {}], {} ticks",
            total,
            bin_width,
            buckets.len(),
            k_min,
            k_max,
            ticks.len()
        );
    }

    Histogram {
        bin_width,
        buckets,
        mean: mean(values),
        median: upper_median(values),
        ticks,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn labels(h: &Histogram) -> Vec<&str> {
        h.buckets.iter().map(|b| b.label.as_str()).collect()
    }

    fn tick_labels(h: &Histogram) -> Vec<&str> {
        h.tick_labels().collect()
    }

    #[test]
    fn four_closes_span_seven_unit_buckets() {
        let h = histogram_of_values(&[12.0, 14.0, 16.0, 18.0], BinWidth::One);

        assert_eq!(labels(&h), ["12", "13", "14", "15", "16", "17", "18"]);
        let counts: Vec<usize> = h.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, [1, 0, 1, 0, 1, 0, 1]);
        assert_relative_eq!(h.mean, 15.0);
        assert_relative_eq!(h.median, 16.0);
        assert_eq!(h.total, 4);
        assert_eq!(h.buckets[0].tail, TailShare::Percent(100.0));
        assert_eq!(h.buckets[6].tail, TailShare::Percent(25.0));
        assert_eq!(h.buckets[5].tail, TailShare::Percent(25.0));
        // span 6 -> step 2
        assert_eq!(tick_labels(&h), ["12", "14", "16", "18"]);
        let indices: Vec<usize> = h.ticks.iter().map(|t| t.index).collect();
        assert_eq!(indices, [0, 2, 4, 6]);
    }

    #[test]
    fn tenth_width_keeps_exact_boundaries() {
        let h = histogram_of_values(&[12.3, 12.4, 12.3], BinWidth::Tenth);
        assert_eq!(labels(&h), ["12.3", "12.4"]);
        assert_eq!(h.buckets[0].count, 2);
        assert_eq!(h.buckets[1].count, 1);
    }

    #[test]
    fn half_width_buckets() {
        let h = histogram_of_values(&[12.2, 12.7, 13.0], BinWidth::Half);
        assert_eq!(labels(&h), ["12.0", "12.5", "13.0"]);
        assert_eq!(h.buckets.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn max_on_boundary_gets_its_own_bucket() {
        let h = histogram_of_values(&[10.5, 11.0], BinWidth::One);
        assert_eq!(labels(&h), ["10", "11"]);
        assert_eq!(h.buckets[1].count, 1);
    }

    #[test]
    fn tiny_tail_is_flagged() {
        let mut values = vec![10.0; 1999];
        values.push(40.0);
        let h = histogram_of_values(&values, BinWidth::One);
        let last = h.buckets.last().unwrap();
        assert_eq!(last.tail, TailShare::BelowThreshold);
        assert_eq!(last.tail.to_string(), "<0.1");
        // empty bucket right below the top inherits the same small share
        assert_eq!(h.buckets[h.buckets.len() - 2].tail, TailShare::BelowThreshold);
    }

    #[test]
    fn tick_spacing_widens_with_span() {
        let wide = histogram_of_values(&[10.0, 80.0], BinWidth::One);
        assert_eq!(tick_labels(&wide).first(), Some(&"10"));
        assert!(wide.tick_labels().all(|t| t.parse::<i64>().unwrap() % 10 == 0));

        let mid = histogram_of_values(&[12.0, 30.0], BinWidth::One);
        assert_eq!(tick_labels(&mid), ["15", "20", "25", "30"]);

        let narrow = histogram_of_values(&[12.0, 20.0], BinWidth::One);
        assert_eq!(tick_labels(&narrow), ["12", "14", "16", "18", "20"]);
    }

    #[test]
    fn ticks_point_at_their_buckets() {
        let h = histogram_of_values(&[12.3, 14.9, 13.1], BinWidth::Half);
        assert!(!h.ticks.is_empty());
        for tick in &h.ticks {
            assert_eq!(h.buckets[tick.index].label, tick.label);
        }
    }

    #[test]
    fn ticks_below_the_first_bucket_are_dropped() {
        // buckets run 12.3 ..= 14.2, so levels 12 and 15 have nowhere to sit
        let h = histogram_of_values(&[12.3, 14.2], BinWidth::Tenth);
        assert_eq!(tick_labels(&h), ["13.0", "14.0"]);
        let indices: Vec<usize> = h.ticks.iter().map(|t| t.index).collect();
        assert_eq!(indices, [7, 17]);
    }

    #[test]
    fn single_value() {
        let h = histogram_of_values(&[17.0], BinWidth::One);
        assert_eq!(labels(&h), ["17"]);
        assert_eq!(h.buckets[0].tail, TailShare::Percent(100.0));
        assert_eq!(h.median, 17.0);
    }

    #[test]
    fn empty_input() {
        let h = histogram_of_values(&[], BinWidth::One);
        assert!(h.is_empty());
        assert!(h.buckets.is_empty());
        assert!(h.ticks.is_empty());
    }

    #[test]
    fn marker_lookup() {
        let h = histogram_of_values(&[12.0, 14.0, 16.0, 18.0], BinWidth::One);
        assert_eq!(h.bucket_index_of(15.0), Some(3));
        assert_eq!(h.bucket_index_of(30.0), None);
        assert_relative_eq!(h.position_of(15.5).unwrap(), 3.5);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn width() -> impl Strategy<Value = BinWidth> {
            prop_oneof![Just(BinWidth::One), Just(BinWidth::Half), Just(BinWidth::Tenth)]
        }

        proptest! {
            #[test]
            fn counts_are_conserved(
                closes in prop::collection::vec(9.0..90.0f64, 1..300),
                w in width(),
            ) {
                let h = histogram_of_values(&closes, w);
                let total: usize = h.buckets.iter().map(|b| b.count).sum();
                prop_assert_eq!(total, closes.len());
                prop_assert_eq!(h.total, closes.len());
                prop_assert_eq!(h.buckets[0].tail, TailShare::Percent(100.0));
            }

            #[test]
            fn tail_shares_never_increase(
                closes in prop::collection::vec(9.0..90.0f64, 1..300),
                w in width(),
            ) {
                let h = histogram_of_values(&closes, w);
                let pct = |t: TailShare| match t {
                    TailShare::Percent(p) => p,
                    TailShare::BelowThreshold => 0.05,
                };
                for pair in h.buckets.windows(2) {
                    prop_assert!(pct(pair[1].tail) <= pct(pair[0].tail) + 1e-9);
                }
            }

            #[test]
            fn ticks_label_the_bucket_they_index(
                closes in prop::collection::vec(9.0..90.0f64, 1..100),
                w in width(),
            ) {
                let h = histogram_of_values(&closes, w);
                for tick in &h.ticks {
                    prop_assert!(tick.index < h.buckets.len());
                    prop_assert_eq!(&h.buckets[tick.index].label, &tick.label);
                }
                prop_assert!(h.ticks.windows(2).all(|p| p[0].index < p[1].index));
            }

            #[test]
            fn every_value_lands_in_its_bucket(
                closes in prop::collection::vec(9.0..90.0f64, 1..100),
                w in width(),
            ) {
                let h = histogram_of_values(&closes, w);
                for &v in &closes {
                    let i = h.bucket_index_of(v);
                    prop_assert!(i.is_some());
                    let b = &h.buckets[i.unwrap()];
                    prop_assert!(b.lower <= v + 1e-9 && v < b.lower + w.value() + 1e-9);
                }
            }
        }
    }
}
