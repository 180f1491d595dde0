use chrono::{DateTime, Local};

use crate::{
    analysis::{Bucket, Histogram, histogram},
    app::{
        ViewStatus,
        views::{DashboardView, FetchContext},
    },
    data::{FetchError, FetchSlot, require_points},
    domain::{BinWidth, DailyPoint},
    models::{DefaultRange, HoverState, RangeSelector, SelectionRange},
    trace_time,
    utils::now_local,
};

struct CachedHistogram {
    version: u64,
    range: Option<SelectionRange>,
    bin_width: BinWidth,
    histogram: Histogram,
}

/// VIX close distribution over a user-chosen window. Defaults to the full history.
pub(crate) struct DistributionView {
    history: Vec<DailyPoint>,
    version: u64,
    pub(crate) selector: RangeSelector,
    pub(crate) hover: HoverState,
    bin_width: BinWidth,
    status: ViewStatus,
    slot: FetchSlot<Vec<DailyPoint>>,
    cache: CachedHistogram,
    last_updated: Option<DateTime<Local>>,
}

impl Default for DistributionView {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            version: 0,
            selector: RangeSelector::new(DefaultRange::Full),
            hover: HoverState::default(),
            bin_width: BinWidth::default(),
            status: ViewStatus::Idle,
            slot: FetchSlot::new("vix-distribution"),
            cache: CachedHistogram {
                version: u64::MAX,
                range: None,
                bin_width: BinWidth::default(),
                histogram: Histogram::empty(BinWidth::default()),
            },
            last_updated: None,
        }
    }
}

impl DistributionView {
    pub(crate) fn history(&self) -> &[DailyPoint] {
        &self.history
    }

    pub(crate) fn window(&self) -> &[DailyPoint] {
        self.selector.window(&self.history)
    }

    /// Selector and the series it indexes, borrowed together for the range slider.
    pub(crate) fn selector_and_history(&mut self) -> (&mut RangeSelector, &[DailyPoint]) {
        (&mut self.selector, &self.history)
    }

    pub(crate) fn bin_width(&self) -> BinWidth {
        self.bin_width
    }

    pub(crate) fn set_bin_width(&mut self, bin_width: BinWidth) {
        if self.bin_width != bin_width {
            self.bin_width = bin_width;
            self.hover.clear();
        }
    }

    /// Histogram of the current window, rebuilt only when data, range or bin width change.
    pub(crate) fn histogram(&mut self) -> &Histogram {
        let range = self.selector.range();
        let cache = &self.cache;
        let stale =
            cache.version != self.version || cache.range != range || cache.bin_width != self.bin_width;
        if stale {
            let built = trace_time!("histogram", 2000, {
                histogram(self.selector.window(&self.history), self.bin_width)
            });
            self.hover.retain_within(built.buckets.len());
            self.cache = CachedHistogram {
                version: self.version,
                range,
                bin_width: self.bin_width,
                histogram: built,
            };
        }
        &self.cache.histogram
    }

    pub(crate) fn hovered_bucket(&mut self) -> Option<Bucket> {
        let index = self.hover.index()?;
        self.histogram().buckets.get(index).cloned()
    }

    pub(crate) fn apply(&mut self, result: Result<Vec<DailyPoint>, FetchError>) {
        match result.and_then(|points| require_points(points, "VIX history")) {
            Ok(points) => {
                self.history = points;
                self.status = ViewStatus::Ready;
                self.last_updated = Some(now_local());
            }
            Err(err) => {
                if err.is_empty_series() {
                    self.history.clear();
                }
                log::warn!("Distribution fetch: {}", err);
                self.status = ViewStatus::from_error(err);
            }
        }
        self.version += 1;
        self.selector.set_len(self.history.len());
        self.hover.clear();
    }
}

impl DashboardView for DistributionView {
    fn request(&mut self, fx: &FetchContext, force: bool) {
        let ticket = if force {
            self.slot.supersede()
        } else {
            match self.slot.begin() {
                Some(ticket) => ticket,
                None => return,
            }
        };
        self.status = ViewStatus::Loading;

        let provider = fx.provider.clone();
        let request = fx.request;
        fx.runner.run_fetch(ticket, fx.repaint.clone(), async move {
            provider.vix_history(request).await
        });
    }

    fn poll(&mut self) -> bool {
        match self.slot.poll() {
            Some(result) => {
                self.apply(result);
                true
            }
            None => false,
        }
    }

    fn fail(&mut self, err: FetchError) {
        self.status = ViewStatus::from_error(err);
    }

    fn status(&self) -> &ViewStatus {
        &self.status
    }

    fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series(closes: &[f64]) -> Vec<DailyPoint> {
        let first = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| DailyPoint::new(first + Duration::days(i as i64), c))
            .collect()
    }

    #[test]
    fn full_window_by_default() {
        let mut view = DistributionView::default();
        view.apply(Ok(series(&[12.0, 14.0, 16.0, 18.0])));
        assert_eq!(view.status(), &ViewStatus::Ready);
        assert_eq!(view.window().len(), 4);
        let h = view.histogram();
        assert_eq!(h.total, 4);
        assert_eq!(h.buckets.len(), 7);
    }

    #[test]
    fn histogram_follows_bin_width() {
        let mut view = DistributionView::default();
        view.apply(Ok(series(&[12.0, 13.0])));
        assert_eq!(view.histogram().buckets.len(), 2);
        view.set_bin_width(BinWidth::Half);
        assert_eq!(view.histogram().buckets.len(), 3);
    }

    #[test]
    fn reload_with_more_history_widens_window() {
        let mut view = DistributionView::default();
        view.apply(Ok(series(&[14.0; 10])));
        assert_eq!(view.window().len(), 10);

        let long: Vec<f64> = (0..500).map(|i| 12.0 + (i % 30) as f64).collect();
        view.apply(Ok(series(&long)));
        let r = view.selector.range().unwrap();
        assert_eq!(r.start, 0);
        assert!(r.span() >= 30);
        assert_eq!(view.histogram().total, r.day_count());
    }

    #[test]
    fn empty_fetch_is_benign() {
        let mut view = DistributionView::default();
        view.apply(Ok(Vec::new()));
        assert_eq!(view.status(), &ViewStatus::Empty);
        assert!(view.histogram().is_empty());
    }

    #[test]
    fn failure_keeps_previous_data() {
        let mut view = DistributionView::default();
        view.apply(Ok(series(&[12.0, 14.0])));
        view.apply(Err(FetchError::status(502)));
        assert!(matches!(view.status(), ViewStatus::Failed(_)));
        assert_eq!(view.history().len(), 2);
    }

    #[test]
    fn hovered_bucket_is_looked_up_by_index() {
        let mut view = DistributionView::default();
        view.apply(Ok(series(&[12.0, 14.0, 16.0, 18.0])));
        view.histogram();
        view.hover.set(Some(2));
        assert_eq!(view.hovered_bucket().map(|b| b.label), Some("14".to_string()));
    }
}
