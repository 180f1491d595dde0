use {
    eframe::egui::{RichText, Ui},
    egui_plot::{HLine, Line, Plot, PlotPoints, Points},
};

use crate::{
    analysis::TrendSegment,
    app::{App, DashboardView, ViewStatus},
    config::{DF, PLOT_CONFIG},
    domain::CorrelationPoint,
    models::nearest_point,
    ui::{
        RangeSlider, StatusAction, UI_CONFIG, UI_TEXT, UiStyleExt, get_change_color,
        render_error_banner, render_view_status,
    },
    utils::format_iso_date,
};

fn render_trend_summary(ui: &mut Ui, points: usize, trend: Option<TrendSegment>) {
    ui.horizontal(|ui| {
        ui.metric(&UI_TEXT.label_points, &points.to_string(), PLOT_CONFIG.color_text_neutral);
        ui.separator();
        match trend {
            Some(t) => ui.metric(
                &UI_TEXT.label_trend,
                &format!("{:+.3}% per VIX point", t.slope),
                PLOT_CONFIG.trend_line_color,
            ),
            None => ui.label_subdued(&UI_TEXT.label_trend_unavailable),
        }
    });
}

/// Scatter of the window plus its trend line; returns the point under the pointer.
fn render_scatter_plot(
    ui: &mut Ui,
    window: &[CorrelationPoint],
    trend: Option<TrendSegment>,
    hovered: Option<usize>,
    height: f32,
) -> Option<usize> {
    let coords: Vec<[f64; 2]> = window.iter().map(|p| [p.vix_close, p.spx_change_pct]).collect();

    let response = Plot::new("vix_spx_correlation")
        .height(height)
        .x_axis_label(UI_TEXT.label_vix.clone())
        .y_axis_label(UI_TEXT.label_spx_change.clone())
        .label_formatter(|_, _| String::new())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            plot_ui.hline(
                HLine::new("", 0.0)
                    .color(PLOT_CONFIG.zero_line_color)
                    .width(1.0),
            );

            plot_ui.points(
                Points::new("VIX / S&P 500", coords.clone())
                    .radius(PLOT_CONFIG.scatter_radius)
                    .color(PLOT_CONFIG.scatter_color)
                    .filled(true),
            );

            if let Some(t) = trend {
                plot_ui.line(
                    Line::new(
                        UI_TEXT.label_trend.clone(),
                        PlotPoints::new(vec![[t.start.x, t.start.y], [t.end.x, t.end.y]]),
                    )
                    .color(PLOT_CONFIG.trend_line_color)
                    .width(PLOT_CONFIG.trend_line_width),
                );
            }

            if let Some(&[x, y]) = hovered.and_then(|i| coords.get(i)) {
                plot_ui.points(
                    Points::new("", vec![[x, y]])
                        .radius(PLOT_CONFIG.scatter_hover_radius)
                        .color(PLOT_CONFIG.scatter_hover_color)
                        .filled(false),
                );
            }

            let bounds = plot_ui.plot_bounds();
            plot_ui.pointer_coordinate().and_then(|p| {
                nearest_point(
                    coords.iter().copied(),
                    [p.x, p.y],
                    [bounds.width(), bounds.height()],
                    UI_CONFIG.scatter_hover_reach,
                )
            })
        });

    if response.response.hovered() {
        response.inner
    } else {
        None
    }
}

fn render_point_readout(ui: &mut Ui, point: Option<&CorrelationPoint>) {
    ui.horizontal(|ui| {
        let Some(p) = point else {
            ui.label_subdued(" ");
            return;
        };
        ui.label(RichText::new(format_iso_date(p.date)).strong());
        ui.separator();
        ui.metric(&UI_TEXT.label_vix, &format!("{:.2}", p.vix_close), PLOT_CONFIG.color_info);
        ui.separator();
        ui.metric(
            &UI_TEXT.label_spx_close,
            &format!("{:.2}", p.spx_close),
            PLOT_CONFIG.color_text_neutral,
        );
        ui.separator();
        ui.metric(
            &UI_TEXT.label_spx_change,
            &format!("{:+.2}%", p.spx_change_pct),
            get_change_color(p.spx_change_pct),
        );
    });
}

impl App {
    pub(super) fn render_correlation(&mut self, ui: &mut Ui) -> StatusAction {
        let view = &mut self.correlation;
        let mut action = StatusAction::None;

        ui.label_subheader(&UI_TEXT.tab_correlation);
        ui.separator();

        if view.aligned().is_empty() {
            return render_view_status(ui, view.status());
        }
        if let ViewStatus::Failed(err) = view.status() {
            action = render_error_banner(ui, err);
        }

        let trend = view.trend();
        let hovered = view.hover.index();
        render_trend_summary(ui, view.window().len(), trend);

        let plot_height = UI_CONFIG.chart.plot_height(ui.available_height(), true);
        let pointer = UI_CONFIG
            .chart_frame()
            .show(ui, |ui| render_scatter_plot(ui, view.window(), trend, hovered, plot_height))
            .inner;

        if view.hover.set(pointer) {
            #[cfg(debug_assertions)]
            if DF.log_hover {
                log::info!("Correlation hover -> {:?}", view.hovered_point().map(|p| p.date));
            }
        }
        render_point_readout(ui, view.hovered_point());

        ui.add_space(UI_CONFIG.chart.gap_before_slider);
        let (selector, aligned) = view.selector_and_aligned();
        let slider = RangeSlider::new(selector, |i| {
            aligned.get(i).map(|p| format_iso_date(p.date)).unwrap_or_default()
        });
        if slider.show(ui) {
            view.hover.clear();

            #[cfg(debug_assertions)]
            if DF.log_range_selector {
                log::info!("Correlation range -> {:?}", view.selector.range());
            }
        }

        action
    }
}
