use {
    eframe::egui::{Align, CentralPanel, Context, FontId, Layout, RichText, TopBottomPanel},
    strum::IntoEnumIterator,
};

use crate::{
    app::{App, View},
    config::PLOT_CONFIG,
    domain::DataSource,
    ui::{StatusAction, UI_CONFIG, UI_TEXT, UiStyleExt},
    utils::format_last_updated,
};

fn view_title(view: View) -> &'static str {
    match view {
        View::Distribution => &UI_TEXT.tab_distribution,
        View::Correlation => &UI_TEXT.tab_correlation,
        View::Futures => &UI_TEXT.tab_futures,
    }
}

impl App {
    pub(crate) fn render_top_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.top_panel_frame();

        TopBottomPanel::top("top_toolbar")
            .frame(frame)
            .min_height(30.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    // 1. TITLE
                    ui.label(
                        RichText::new(&UI_TEXT.app_title)
                            .strong()
                            .size(UI_CONFIG.title_size)
                            .color(UI_CONFIG.colors.heading),
                    );
                    ui.label_subdued(&UI_TEXT.app_subtitle);
                    ui.separator();

                    // 2. VIEW TABS
                    for view in View::iter() {
                        let selected = self.prefs.view == view;
                        if ui
                            .interactive_label(
                                view_title(view),
                                selected,
                                UI_CONFIG.colors.label,
                                FontId::proportional(UI_CONFIG.tab_font_size),
                            )
                            .clicked()
                        {
                            self.set_view(view);
                        }
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        // 3. RELOAD
                        if ui.button(ui.button_text_primary(&UI_TEXT.label_reload)).clicked() {
                            self.refetch_all(ctx);
                        }
                        ui.separator();

                        let updated = self
                            .active_view()
                            .last_updated()
                            .map(|at| format_last_updated(&at))
                            .unwrap_or_else(|| UI_TEXT.label_never.clone());
                        ui.label(RichText::new(updated).strong().color(PLOT_CONFIG.color_text_primary));
                        ui.label_subdued(&UI_TEXT.label_last_updated);
                        ui.separator();

                        // 4. SOURCE
                        let mut source = self.prefs.source;
                        for candidate in DataSource::iter().collect::<Vec<_>>().into_iter().rev() {
                            ui.selectable_value(&mut source, candidate, candidate.to_string());
                        }
                        ui.label_subdued(&UI_TEXT.label_source);
                        if source != self.prefs.source {
                            self.set_source(ctx, source);
                        }
                    });
                });
            });
    }

    pub(crate) fn render_status_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.bottom_panel_frame();
        TopBottomPanel::bottom("status_panel")
            .frame(frame)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let view = self.active_view();

                    ui.label_subdued(&UI_TEXT.label_source);
                    ui.label(
                        RichText::new(self.config.source.to_string())
                            .strong()
                            .color(PLOT_CONFIG.color_info),
                    );
                    if let Some(proxy) = &self.config.proxy_base_url {
                        ui.label_subdued(format!("via {}", proxy));
                    }

                    if view.is_pending() {
                        ui.separator();
                        ui.spinner();
                    }
                });
            });
    }

    pub(crate) fn render_central_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.central_panel_frame();
        let action = CentralPanel::default()
            .frame(frame)
            .show(ctx, |ui| match self.prefs.view {
                View::Distribution => self.render_distribution(ui),
                View::Correlation => self.render_correlation(ui),
                View::Futures => self.render_futures(ui),
            })
            .inner;

        if action == StatusAction::Retry {
            self.request_active(ctx, true);
        }
    }
}
