use {
    chrono::{DateTime, Local},
    std::borrow::Cow,
};

use crate::{
    analysis::{TermStructureSummary, illustrative_curve, summarize},
    app::{
        ViewStatus,
        views::{DashboardView, FetchContext},
    },
    data::{FetchError, FetchSlot, require_points},
    domain::{FuturesPoint, TimeRange},
    models::HoverState,
    utils::now_local,
};

/// VIX futures term structure. Falls back to an illustrative curve for the selected lookback
/// when no live contracts are available.
pub(crate) struct FuturesView {
    live: Vec<FuturesPoint>,
    time_range: TimeRange,
    pub(crate) hover: HoverState,
    status: ViewStatus,
    slot: FetchSlot<Vec<FuturesPoint>>,
    last_updated: Option<DateTime<Local>>,
}

impl Default for FuturesView {
    fn default() -> Self {
        Self {
            live: Vec::new(),
            time_range: TimeRange::default(),
            hover: HoverState::default(),
            status: ViewStatus::Idle,
            slot: FetchSlot::new("futures-curve"),
            last_updated: None,
        }
    }
}

impl FuturesView {
    pub(crate) fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub(crate) fn set_time_range(&mut self, time_range: TimeRange) {
        if self.time_range != time_range {
            self.time_range = time_range;
            self.hover.clear();
        }
    }

    pub(crate) fn is_illustrative(&self) -> bool {
        self.live.is_empty()
    }

    pub(crate) fn curve(&self) -> Cow<'_, [FuturesPoint]> {
        if self.live.is_empty() {
            Cow::Owned(illustrative_curve(self.time_range))
        } else {
            Cow::Borrowed(&self.live)
        }
    }

    pub(crate) fn summary(&self) -> TermStructureSummary {
        summarize(&self.curve())
    }

    pub(crate) fn apply(&mut self, result: Result<Vec<FuturesPoint>, FetchError>) {
        match result.and_then(|points| require_points(points, "VIX futures")) {
            Ok(points) => {
                self.live = points;
                self.status = ViewStatus::Ready;
                self.last_updated = Some(now_local());
            }
            Err(err) => {
                log::warn!("Futures fetch: {}", err);
                self.status = ViewStatus::from_error(err);
            }
        }
        self.hover.retain_within(self.curve().len());
    }
}

impl DashboardView for FuturesView {
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
        fx.runner.run_fetch(ticket, fx.repaint.clone(), async move {
            provider.futures_curve().await
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
    use crate::analysis::CurveShape;

    #[test]
    fn illustrative_until_live_data_arrives() {
        let mut view = FuturesView::default();
        assert!(view.is_illustrative());
        assert_eq!(view.curve()[0].price, 14.5);

        view.set_time_range(TimeRange::OneMonth);
        assert_eq!(view.summary().shape, CurveShape::Backwardation);

        view.apply(Ok(vec![
            FuturesPoint::spot(16.0),
            FuturesPoint::contract(1, 17.0),
            FuturesPoint::contract(2, 18.0),
        ]));
        assert!(!view.is_illustrative());
        assert_eq!(view.curve().len(), 3);
        assert_eq!(view.summary().shape, CurveShape::Contango);
    }

    #[test]
    fn failure_keeps_showing_a_curve() {
        let mut view = FuturesView::default();
        view.apply(Err(FetchError::status(500)));
        assert!(matches!(view.status(), ViewStatus::Failed(_)));
        assert_eq!(view.curve().len(), 8);
    }
}
