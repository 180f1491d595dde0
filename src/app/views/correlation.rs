use chrono::{DateTime, Local};

use crate::{
    analysis::{TrendPoint, TrendSegment, align, fit_line},
    app::{
        ViewStatus,
        views::{DashboardView, FetchContext},
    },
    data::{FetchError, FetchSlot, require_points},
    domain::{CorrelationPoint, DailyPoint},
    models::{DefaultRange, HoverState, RangeSelector, SelectionRange},
    utils::now_local,
};

type SeriesOutcome = Option<Result<Vec<DailyPoint>, FetchError>>;

/// VIX level against same-day S&P 500 % change, with a least-squares trend over the window.
/// Defaults to the trailing year.
pub(crate) struct CorrelationView {
    vix: SeriesOutcome,
    spx: SeriesOutcome,
    aligned: Vec<CorrelationPoint>,
    version: u64,
    pub(crate) selector: RangeSelector,
    pub(crate) hover: HoverState,
    status: ViewStatus,
    vix_slot: FetchSlot<Vec<DailyPoint>>,
    spx_slot: FetchSlot<Vec<DailyPoint>>,
    trend: Option<(u64, Option<SelectionRange>, Option<TrendSegment>)>,
    last_updated: Option<DateTime<Local>>,
}

impl Default for CorrelationView {
    fn default() -> Self {
        Self {
            vix: None,
            spx: None,
            aligned: Vec::new(),
            version: 0,
            selector: RangeSelector::new(DefaultRange::Trailing365),
            hover: HoverState::default(),
            status: ViewStatus::Idle,
            vix_slot: FetchSlot::new("correlation-vix"),
            spx_slot: FetchSlot::new("correlation-spx"),
            trend: None,
            last_updated: None,
        }
    }
}

impl CorrelationView {
    pub(crate) fn aligned(&self) -> &[CorrelationPoint] {
        &self.aligned
    }

    pub(crate) fn window(&self) -> &[CorrelationPoint] {
        self.selector.window(&self.aligned)
    }

    pub(crate) fn selector_and_aligned(&mut self) -> (&mut RangeSelector, &[CorrelationPoint]) {
        (&mut self.selector, &self.aligned)
    }

    /// Trend of `spx_change_pct` on `vix_close` across the window; `None` when it can't be fit.
    pub(crate) fn trend(&mut self) -> Option<TrendSegment> {
        let range = self.selector.range();
        match self.trend {
            Some((version, cached_range, segment)) if version == self.version && cached_range == range => {
                segment
            }
            _ => {
                let points: Vec<TrendPoint> = self
                    .window()
                    .iter()
                    .map(|p| TrendPoint::new(p.vix_close, p.spx_change_pct))
                    .collect();
                let segment = fit_line(&points);
                self.trend = Some((self.version, range, segment));
                segment
            }
        }
    }

    pub(crate) fn hovered_point(&self) -> Option<&CorrelationPoint> {
        self.window().get(self.hover.index()?)
    }

    pub(crate) fn apply_vix(&mut self, result: Result<Vec<DailyPoint>, FetchError>) {
        self.vix = Some(result.and_then(|p| require_points(p, "VIX history")));
        self.rebuild();
    }

    pub(crate) fn apply_spx(&mut self, result: Result<Vec<DailyPoint>, FetchError>) {
        self.spx = Some(result.and_then(|p| require_points(p, "S&P 500 history")));
        self.rebuild();
    }

    fn rebuild(&mut self) {
        if self.vix_slot.is_pending() || self.spx_slot.is_pending() {
            self.status = ViewStatus::Loading;
            return;
        }

        let outcome = match (&self.vix, &self.spx) {
            (Some(Ok(vix)), Some(Ok(spx))) => {
                require_points(align(vix, spx), "VIX/S&P 500 overlap")
            }
            (Some(Err(err)), _) | (_, Some(Err(err))) => Err(err.clone()),
            _ => return,
        };

        match outcome {
            Ok(aligned) => {
                self.aligned = aligned;
                self.status = ViewStatus::Ready;
                self.last_updated = Some(now_local());
            }
            Err(err) => {
                if err.is_empty_series() {
                    self.aligned.clear();
                }
                log::warn!("Correlation fetch: {}", err);
                self.status = ViewStatus::from_error(err);
            }
        }
        self.version += 1;
        self.selector.set_len(self.aligned.len());
        self.hover.clear();
    }
}

impl DashboardView for CorrelationView {
    fn request(&mut self, fx: &FetchContext, force: bool) {
        let tickets = if force {
            Some((self.vix_slot.supersede(), self.spx_slot.supersede()))
        } else if self.is_pending() {
            None
        } else {
            self.vix_slot.begin().zip(self.spx_slot.begin())
        };
        let Some((vix_ticket, spx_ticket)) = tickets else {
            return;
        };
        self.status = ViewStatus::Loading;

        let provider = fx.provider.clone();
        let request = fx.request;
        fx.runner.run_fetch(vix_ticket, fx.repaint.clone(), async move {
            provider.vix_history(request).await
        });

        let provider = fx.provider.clone();
        fx.runner.run_fetch(spx_ticket, fx.repaint.clone(), async move {
            provider.spx_history(request).await
        });
    }

    fn poll(&mut self) -> bool {
        let mut changed = false;
        if let Some(result) = self.vix_slot.poll() {
            self.apply_vix(result);
            changed = true;
        }
        if let Some(result) = self.spx_slot.poll() {
            self.apply_spx(result);
            changed = true;
        }
        changed
    }

    fn fail(&mut self, err: FetchError) {
        self.status = ViewStatus::from_error(err);
    }

    fn status(&self) -> &ViewStatus {
        &self.status
    }

    fn is_pending(&self) -> bool {
        self.vix_slot.is_pending() || self.spx_slot.is_pending()
    }

    fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn series(closes: &[f64]) -> Vec<DailyPoint> {
        let first = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| DailyPoint::new(first + Duration::days(i as i64), c))
            .collect()
    }

    #[test]
    fn waits_for_both_series() {
        let mut view = CorrelationView::default();
        view.apply_vix(Ok(series(&[12.0, 13.0, 14.0])));
        assert!(view.aligned().is_empty());
        assert_eq!(view.status(), &ViewStatus::Idle);

        view.apply_spx(Ok(series(&[100.0, 101.0, 99.0])));
        assert_eq!(view.status(), &ViewStatus::Ready);
        assert_eq!(view.aligned().len(), 3);
        assert_relative_eq!(view.aligned()[1].spx_change_pct, 1.0);
    }

    #[test]
    fn either_failure_fails_the_view() {
        let mut view = CorrelationView::default();
        view.apply_vix(Ok(series(&[12.0])));
        view.apply_spx(Err(FetchError::timeout()));
        assert_eq!(
            view.status(),
            &ViewStatus::Failed(FetchError::Timeout { after_ms: 10_000 })
        );
    }

    #[test]
    fn no_overlap_is_empty() {
        let mut view = CorrelationView::default();
        view.apply_vix(Ok(series(&[12.0, 13.0])));
        let later: Vec<DailyPoint> = series(&[100.0, 101.0])
            .into_iter()
            .map(|mut p| {
                p.date += Duration::days(30);
                p
            })
            .collect();
        view.apply_spx(Ok(later));
        assert_eq!(view.status(), &ViewStatus::Empty);
        assert!(view.trend().is_none());
    }

    #[test]
    fn longer_replacement_keeps_selector_wide() {
        let short: Vec<f64> = (0..10).map(|i| 15.0 + i as f64).collect();
        let mut view = CorrelationView::default();
        view.apply_vix(Ok(series(&short)));
        view.apply_spx(Ok(series(&short)));
        assert_eq!(view.selector.range(), Some(SelectionRange { start: 0, end: 9 }));

        let long: Vec<f64> = (0..500).map(|i| 15.0 + (i % 25) as f64).collect();
        view.apply_vix(Ok(series(&long)));
        view.apply_spx(Ok(series(&long)));
        assert_eq!(view.aligned().len(), 500);

        let r = view.selector.range().unwrap();
        assert!(r.end < 500);
        assert!(r.span() >= view.selector.effective_min_window());
        assert_eq!(view.selector.effective_min_window(), 30);
        assert_eq!(view.window().len(), r.day_count());
    }

    #[test]
    fn trend_over_window() {
        let mut view = CorrelationView::default();
        view.apply_vix(Ok(series(&[10.0, 20.0, 30.0])));
        view.apply_spx(Ok(series(&[100.0, 110.0, 99.0])));
        let seg = view.trend().unwrap();
        assert_eq!(seg.start.x, 10.0);
        assert_eq!(seg.end.x, 30.0);
    }
}
