use {
    eframe::egui::{RichText, Ui},
    egui_plot::{Axis, AxisHints, GridMark, Line, Plot, PlotPoints, Points},
    strum::IntoEnumIterator,
};

use crate::{
    analysis::TermStructureSummary,
    app::{App, DashboardView, FuturesView, ViewStatus},
    config::{DF, PLOT_CONFIG, PROVIDER},
    domain::{FuturesPoint, TimeRange},
    models::category_at,
    ui::{
        ShapeColor, StatusAction, UI_CONFIG, UI_TEXT, UiStyleExt, apply_opacity, get_change_color,
        render_error_banner,
    },
};

fn render_lookback_selector(ui: &mut Ui, view: &mut FuturesView) {
    ui.label_subdued(&UI_TEXT.label_lookback);
    let mut range = view.time_range();
    for candidate in TimeRange::iter() {
        ui.selectable_value(&mut range, candidate, candidate.to_string());
    }
    view.set_time_range(range);
}

fn render_summary(ui: &mut Ui, summary: &TermStructureSummary, illustrative: bool) {
    let decimals = PROVIDER.futures.price_decimals as usize;
    ui.horizontal(|ui| {
        if let Some(spot) = summary.spot {
            ui.metric(&UI_TEXT.label_spot, &format!("{:.*}", decimals, spot), PLOT_CONFIG.color_info);
            ui.separator();
        }
        ui.metric("M1", &format!("{:.*}", decimals, summary.m1), PLOT_CONFIG.color_text_neutral);
        ui.metric("M2", &format!("{:.*}", decimals, summary.m2), PLOT_CONFIG.color_text_neutral);
        ui.separator();
        ui.metric(
            &UI_TEXT.label_spread,
            &format!("{:+.*}", decimals, summary.spread),
            get_change_color(summary.spread),
        );
        ui.separator();
        ui.metric(
            &UI_TEXT.label_structure,
            &summary.shape.to_string(),
            summary.shape.color(),
        );
        ui.separator();
        if illustrative {
            ui.label(
                RichText::new(&UI_TEXT.label_illustrative)
                    .italics()
                    .color(PLOT_CONFIG.color_warning),
            );
        } else {
            ui.label_subdued(&UI_TEXT.label_live);
        }
    });
}

fn month_axis(curve: &[FuturesPoint]) -> AxisHints<'static> {
    let months: Vec<String> = curve.iter().map(|p| p.month.clone()).collect();
    AxisHints::new(Axis::X).formatter(move |mark, _range| {
        let slot = mark.value.round();
        if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
            return String::new();
        }
        months.get(slot as usize).cloned().unwrap_or_default()
    })
}

/// Curve line with a shaded area under it; returns the month under the pointer.
fn render_curve_plot(
    ui: &mut Ui,
    curve: &[FuturesPoint],
    hovered: Option<usize>,
    height: f32,
) -> Option<usize> {
    let n = curve.len();
    let coords: Vec<[f64; 2]> = curve
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.price])
        .collect();

    let (lo, hi) = curve
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.price), hi.max(p.price))
        });
    let pad = ((hi - lo) * 0.25).max(0.5);
    let floor = lo - pad;

    let response = Plot::new("vix_futures_curve")
        .height(height)
        .custom_x_axes(vec![month_axis(curve)])
        .custom_y_axes(vec![AxisHints::new_y().label(UI_TEXT.label_price.clone())])
        .label_formatter(|_, _| String::new())
        .x_grid_spacer(move |_input| {
            (0..n)
                .map(|i| GridMark { value: i as f64, step_size: 1.0 })
                .collect()
        })
        .include_x(-0.5)
        .include_x(n as f64 - 0.5)
        .include_y(floor)
        .include_y(hi + pad)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            let color = PLOT_CONFIG.curve_line_color;
            plot_ui.line(
                Line::new("VIX futures", PlotPoints::new(coords.clone()))
                    .color(color)
                    .width(PLOT_CONFIG.curve_line_width)
                    .fill(floor as f32),
            );
            plot_ui.points(
                Points::new("", coords.clone())
                    .radius(PLOT_CONFIG.curve_point_radius)
                    .color(color)
                    .filled(true),
            );
            if let Some(&[x, y]) = hovered.and_then(|i| coords.get(i)) {
                plot_ui.points(
                    Points::new("", vec![[x, y]])
                        .radius(PLOT_CONFIG.curve_point_radius * 1.8)
                        .color(apply_opacity(PLOT_CONFIG.color_text_neutral, 0.9))
                        .filled(false),
                );
            }
            plot_ui.pointer_coordinate().and_then(|p| category_at(p.x, n))
        });

    if response.response.hovered() {
        response.inner
    } else {
        None
    }
}

fn render_month_readout(ui: &mut Ui, point: Option<&FuturesPoint>) {
    ui.horizontal(|ui| {
        let Some(p) = point else {
            ui.label_subdued(" ");
            return;
        };
        ui.metric(
            &p.month,
            &format!("{:.*}", PROVIDER.futures.price_decimals as usize, p.price),
            PLOT_CONFIG.curve_line_color,
        );
    });
}

impl App {
    pub(super) fn render_futures(&mut self, ui: &mut Ui) -> StatusAction {
        let view = &mut self.futures;
        let mut action = StatusAction::None;

        ui.horizontal(|ui| {
            ui.label_subheader(&UI_TEXT.tab_futures);
            ui.separator();
            render_lookback_selector(ui, view);
            if view.status().is_loading() {
                ui.spinner();
            }
        });
        ui.separator();

        // A failed fetch still leaves a curve to show, so the banner sits above it
        if let ViewStatus::Failed(err) = view.status() {
            action = render_error_banner(ui, err);
        }

        let curve = view.curve().into_owned();
        let summary = view.summary();
        render_summary(ui, &summary, view.is_illustrative());

        let hovered = view.hover.index();
        let plot_height = UI_CONFIG.chart.plot_height(ui.available_height(), false);
        let pointer = UI_CONFIG
            .chart_frame()
            .show(ui, |ui| render_curve_plot(ui, &curve, hovered, plot_height))
            .inner;
        render_month_readout(ui, pointer.and_then(|i| curve.get(i)));

        if view.hover.set(pointer) {
            #[cfg(debug_assertions)]
            if DF.log_hover {
                log::info!("Futures hover -> {:?}", view.hover.index());
            }
        }

        action
    }
}
