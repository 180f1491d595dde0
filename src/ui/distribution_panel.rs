use {
    eframe::egui::{RichText, Ui},
    egui_plot::{Axis, AxisHints, Bar, BarChart, GridMark, Plot, VLine},
    std::collections::HashMap,
    strum::IntoEnumIterator,
};

use crate::{
    analysis::{Bucket, Histogram},
    app::{App, DashboardView, DistributionView, ViewStatus},
    config::{DF, PLOT_CONFIG},
    domain::BinWidth,
    models::category_at,
    ui::{
        RangeSlider, StatusAction, UI_CONFIG, UI_TEXT, UiStyleExt, render_error_banner,
        render_view_status,
    },
    utils::format_iso_date,
};

fn bucket_axis(hist: &Histogram) -> AxisHints<'static> {
    let labels: HashMap<usize, String> =
        hist.ticks.iter().map(|t| (t.index, t.label.clone())).collect();

    AxisHints::new(Axis::X)
        .label(UI_TEXT.label_vix.clone())
        .formatter(move |mark, _range| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
                return String::new();
            }
            labels.get(&(slot as usize)).cloned().unwrap_or_default()
        })
}

fn render_bin_width_selector(ui: &mut Ui, view: &mut DistributionView) {
    ui.horizontal(|ui| {
        ui.label_subdued(&UI_TEXT.label_bin_width);
        let mut width = view.bin_width();
        for candidate in BinWidth::iter() {
            ui.selectable_value(&mut width, candidate, candidate.to_string());
        }
        view.set_bin_width(width);
    });
}

fn render_summary(ui: &mut Ui, hist: &Histogram) {
    ui.horizontal(|ui| {
        let precision = hist.bin_width.decimals() + 1;
        ui.metric(
            &UI_TEXT.label_mean,
            &format!("{:.*}", precision, hist.mean),
            PLOT_CONFIG.mean_line_color,
        );
        ui.separator();
        ui.metric(
            &UI_TEXT.label_median,
            &format!("{:.*}", precision, hist.median),
            PLOT_CONFIG.median_line_color,
        );
        ui.separator();
        ui.metric(
            &UI_TEXT.label_days_in_window,
            &hist.total.to_string(),
            PLOT_CONFIG.color_text_neutral,
        );
    });
}

/// Draws the bars and marker lines; returns the bucket under the pointer.
fn render_histogram_plot(
    ui: &mut Ui,
    hist: &Histogram,
    hovered: Option<usize>,
    height: f32,
) -> Option<usize> {
    let n = hist.buckets.len();
    let bars: Vec<Bar> = hist
        .buckets
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let fill = if hovered == Some(i) {
                PLOT_CONFIG.bar_hover_color
            } else {
                PLOT_CONFIG.bar_color
            };
            Bar::new(i as f64, b.count as f64)
                .width(PLOT_CONFIG.bar_width_pct)
                .fill(fill)
                .name(&b.label)
        })
        .collect();

    let marks: Vec<usize> = hist.ticks.iter().map(|t| t.index).collect();
    let tick_step = marks
        .windows(2)
        .map(|w| (w[1] - w[0]) as f64)
        .next()
        .unwrap_or(1.0);

    // Bars sit at integer slots, so a bucket's lower edge is half a slot to the left
    let marker_x = |value: f64| hist.position_of(value).map(|p| p - 0.5);
    let mean_x = marker_x(hist.mean);
    let median_x = marker_x(hist.median);
    let y_max = hist.max_count().max(1) as f64 * 1.1;

    let response = Plot::new("vix_distribution")
        .height(height)
        .custom_x_axes(vec![bucket_axis(hist)])
        .custom_y_axes(vec![AxisHints::new_y().label(UI_TEXT.label_days_in_window.clone())])
        .label_formatter(|_, _| String::new())
        .x_grid_spacer(move |_input| {
            marks
                .iter()
                .map(|&i| GridMark { value: i as f64, step_size: tick_step })
                .collect()
        })
        .include_x(-0.5)
        .include_x(n as f64 - 0.5)
        .include_y(0.0)
        .include_y(y_max)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("VIX", bars));
            if let Some(x) = mean_x {
                plot_ui.vline(
                    VLine::new(UI_TEXT.label_mean.clone(), x)
                        .color(PLOT_CONFIG.mean_line_color)
                        .width(PLOT_CONFIG.marker_line_width),
                );
            }
            if let Some(x) = median_x {
                plot_ui.vline(
                    VLine::new(UI_TEXT.label_median.clone(), x)
                        .color(PLOT_CONFIG.median_line_color)
                        .width(PLOT_CONFIG.marker_line_width),
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

fn render_hover_readout(ui: &mut Ui, bucket: Option<&Bucket>) {
    ui.horizontal(|ui| {
        let Some(bucket) = bucket else {
            ui.label_subdued(" ");
            return;
        };
        ui.metric(&UI_TEXT.label_vix, &bucket.label, PLOT_CONFIG.color_info);
        ui.separator();
        ui.metric(&UI_TEXT.label_count, &bucket.count.to_string(), PLOT_CONFIG.color_text_neutral);
        ui.separator();
        ui.label(
            RichText::new(format!("{} {}%", UI_TEXT.label_top_pct, bucket.tail))
                .strong()
                .color(PLOT_CONFIG.color_warning),
        );
        ui.label_subdued(format!("{} {}", UI_TEXT.label_close_at_or_above, bucket.label));
    });
}

impl App {
    pub(super) fn render_distribution(&mut self, ui: &mut Ui) -> StatusAction {
        let view = &mut self.distribution;
        let mut action = StatusAction::None;

        ui.horizontal(|ui| {
            ui.label_subheader(&UI_TEXT.tab_distribution);
            ui.separator();
            render_bin_width_selector(ui, view);
        });
        ui.separator();

        // Without data there is nothing to draw but the placeholder
        if view.history().is_empty() {
            return render_view_status(ui, view.status());
        }
        if let ViewStatus::Failed(err) = view.status() {
            action = render_error_banner(ui, err);
        }

        let hovered = view.hover.index();
        let hist = view.histogram();
        render_summary(ui, hist);

        let plot_height = UI_CONFIG.chart.plot_height(ui.available_height(), true);
        let pointer = UI_CONFIG
            .chart_frame()
            .show(ui, |ui| render_histogram_plot(ui, hist, hovered, plot_height))
            .inner;

        if view.hover.set(pointer) {
            #[cfg(debug_assertions)]
            if DF.log_hover {
                log::info!("Distribution hover -> {:?}", view.hover.index());
            }
        }
        render_hover_readout(ui, view.hovered_bucket().as_ref());

        ui.add_space(UI_CONFIG.chart.gap_before_slider);
        let (selector, history) = view.selector_and_history();
        let slider = RangeSlider::new(selector, |i| {
            history.get(i).map(|p| format_iso_date(p.date)).unwrap_or_default()
        });
        if slider.show(ui) {
            #[cfg(debug_assertions)]
            if DF.log_range_selector {
                log::info!("Distribution range -> {:?}", view.selector.range());
            }
        }

        action
    }
}
