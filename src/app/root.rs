use {
    eframe::{
        Frame, Storage,
        egui::{Context, Visuals},
    },
    serde::{Deserialize, Serialize},
    std::time::Duration,
};

use crate::{
    Cli,
    app::{
        CorrelationView, DashboardView, DistributionView, FetchContext, FuturesView, Preferences,
        View,
    },
    config::DF,
    data::{FetchError, HistoryRequest, SharedProvider, TaskRunner, provider_for},
    domain::{DataSource, DataSourceConfig},
    ui::UI_CONFIG,
};

#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct App {
    pub(crate) prefs: Preferences, // persists across sessions.
    #[serde(skip)]
    pub(crate) config: DataSourceConfig,
    #[serde(skip)]
    pub(crate) provider: Option<SharedProvider>,
    #[serde(skip)]
    pub(crate) runner: Option<TaskRunner>,
    /// Why fetching is impossible this session (no runtime, bad client), if it is.
    #[serde(skip)]
    pub(crate) setup_error: Option<FetchError>,
    #[serde(skip)]
    pub(crate) distribution: DistributionView,
    #[serde(skip)]
    pub(crate) correlation: CorrelationView,
    #[serde(skip)]
    pub(crate) futures: FuturesView,
}

impl Default for App {
    fn default() -> Self {
        Self {
            prefs: Preferences::default(),
            config: DataSourceConfig::default(),
            provider: None,
            runner: None,
            setup_error: None,
            distribution: DistributionView::default(),
            correlation: CorrelationView::default(),
            futures: FuturesView::default(),
        }
    }
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let mut app: App = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        #[cfg(debug_assertions)]
        if DF.log_persistence {
            log::info!("LOAD [App]: {:?}", app.prefs);
        }

        if let Some(source) = args.source {
            app.prefs.source = source;
        }
        app.config = args.data_source_config(app.prefs.source);
        app.distribution.set_bin_width(app.prefs.bin_width);
        app.futures.set_time_range(app.prefs.time_range);

        match TaskRunner::new() {
            Ok(runner) => app.runner = Some(runner),
            Err(e) => {
                log::error!("Failed to start the fetch runtime: {}", e);
                app.setup_error = Some(FetchError::failed(format!("fetch runtime unavailable: {}", e)));
            }
        }
        app.rebuild_provider();

        setup_custom_visuals(&cc.egui_ctx);
        app
    }

    fn rebuild_provider(&mut self) {
        match provider_for(&self.config) {
            Ok(provider) => {
                log::info!("Using {} provider", provider.source());
                self.provider = Some(provider);
            }
            Err(e) => {
                log::error!("Could not build {} provider: {}", self.config.source, e);
                self.provider = None;
                self.setup_error = Some(e);
            }
        }
    }

    fn fetch_context(&self, ctx: &Context) -> Result<FetchContext, FetchError> {
        let unavailable = || {
            self.setup_error
                .clone()
                .unwrap_or_else(|| FetchError::failed("no data provider"))
        };
        let runner = self.runner.clone().ok_or_else(unavailable)?;
        let provider = self.provider.clone().ok_or_else(unavailable)?;
        Ok(FetchContext {
            runner,
            provider,
            request: HistoryRequest::from_config(&self.config),
            repaint: Some(ctx.clone()),
        })
    }

    pub(crate) fn active_view(&self) -> &dyn DashboardView {
        match self.prefs.view {
            View::Distribution => &self.distribution,
            View::Correlation => &self.correlation,
            View::Futures => &self.futures,
        }
    }

    fn active_view_mut(&mut self) -> &mut dyn DashboardView {
        match self.prefs.view {
            View::Distribution => &mut self.distribution,
            View::Correlation => &mut self.correlation,
            View::Futures => &mut self.futures,
        }
    }

    /// Fetch for the active view. `force` abandons anything in flight (Retry / reload).
    pub(crate) fn request_active(&mut self, ctx: &Context, force: bool) {
        match self.fetch_context(ctx) {
            Ok(fx) => self.active_view_mut().request(&fx, force),
            Err(err) => self.active_view_mut().fail(err),
        }
    }

    pub(crate) fn set_view(&mut self, view: View) {
        if self.prefs.view != view {
            self.prefs.view = view;
        }
    }

    /// Switching source replaces every view's data. Selected ranges are clamped, not reset.
    pub(crate) fn set_source(&mut self, ctx: &Context, source: DataSource) {
        if self.prefs.source == source {
            return;
        }
        log::info!("Data source: {} -> {}", self.prefs.source, source);
        self.prefs.source = source;
        self.config = self.config.with_source(source);
        self.setup_error = None;
        self.rebuild_provider();
        self.refetch_all(ctx);
    }

    /// Abandons anything in flight and re-fetches every view from the current source.
    pub(crate) fn refetch_all(&mut self, ctx: &Context) {
        let fx = self.fetch_context(ctx);
        let views: [&mut dyn DashboardView; 3] =
            [&mut self.distribution, &mut self.correlation, &mut self.futures];
        for view in views {
            match &fx {
                Ok(fx) => view.request(fx, true),
                Err(err) => view.fail(err.clone()),
            }
        }
    }

    fn poll_fetches(&mut self) {
        self.distribution.poll();
        self.correlation.poll();
        self.futures.poll();
    }

    fn any_pending(&self) -> bool {
        self.distribution.is_pending() || self.correlation.is_pending() || self.futures.is_pending()
    }
}

impl eframe::App for App {
    fn save(&mut self, storage: &mut dyn Storage) {
        self.prefs.bin_width = self.distribution.bin_width();
        self.prefs.time_range = self.futures.time_range();

        #[cfg(debug_assertions)]
        if DF.log_persistence {
            log::info!("SAVE [App]: {:?}", self.prefs);
        }

        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Disable text selection globally so labels never show an I-beam cursor
        ctx.style_mut(|s| s.interaction.selectable_labels = false);

        self.poll_fetches();
        if self.active_view().needs_request() {
            self.request_active(ctx, false);
        }

        self.render_top_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        // Timeouts are detected on poll, so keep ticking while anything is in flight
        if self.any_pending() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
}
