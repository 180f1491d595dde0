mod correlation;
mod distribution;
mod futures;

use {
    chrono::{DateTime, Local},
    eframe::egui::Context,
};

use crate::{
    app::ViewStatus,
    data::{FetchError, HistoryRequest, SharedProvider, TaskRunner},
};

pub(crate) use {
    correlation::CorrelationView, distribution::DistributionView, futures::FuturesView,
};

/// Everything a view needs to start a fetch.
#[derive(Clone)]
pub(crate) struct FetchContext {
    pub(crate) runner: TaskRunner,
    pub(crate) provider: SharedProvider,
    pub(crate) request: HistoryRequest,
    pub(crate) repaint: Option<Context>,
}

/// Shared lifecycle of the three dashboard views.
pub(crate) trait DashboardView {
    /// Starts this view's fetches. Without `force`, a view with a request in flight is left alone.
    fn request(&mut self, fx: &FetchContext, force: bool);

    /// Applies finished fetches. Returns true when anything changed.
    fn poll(&mut self) -> bool;

    /// Marks the view failed without fetching (e.g. no runtime to fetch on).
    fn fail(&mut self, err: FetchError);

    fn status(&self) -> &ViewStatus;

    fn is_pending(&self) -> bool;

    fn last_updated(&self) -> Option<DateTime<Local>>;

    /// Needs a fetch before it can show anything.
    fn needs_request(&self) -> bool {
        matches!(self.status(), ViewStatus::Idle)
    }
}
