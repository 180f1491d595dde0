use eframe::egui::{Color32, CornerRadius, Frame, Margin, Stroke, Vec2};

pub use crate::ui::ui_text::UI_TEXT;

/// Dashboard palette (slate dark theme)
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub chart_card: Color32,
    pub chart_border: Color32,
}

/// Vertical budget of a chart view. The chart takes what the header, readout and slider leave.
#[derive(Clone, Copy, Default)]
pub struct ChartLayout {
    pub min_plot_height: f32,
    /// Space kept under a histogram or scatter for the readout row and range slider
    pub reserve_with_slider: f32,
    /// Space kept under the futures curve for its readout row
    pub reserve_readout_only: f32,
    pub gap_before_slider: f32,
}

impl ChartLayout {
    pub fn plot_height(&self, available: f32, with_slider: bool) -> f32 {
        let reserve = if with_slider {
            self.reserve_with_slider
        } else {
            self.reserve_readout_only
        };
        (available - reserve).max(self.min_plot_height)
    }
}

#[derive(Clone, Copy, Default)]
pub struct UiConfig {
    pub colors: UiColors,
    pub chart: ChartLayout,
    pub title_size: f32,
    pub tab_font_size: f32,
    pub tab_padding: Vec2,
    /// Hover radius around scatter points, in plot-width fractions
    pub scatter_hover_reach: f64,
    /// Top margin of the loading/empty/error placeholders
    pub placeholder_top_space: f32,
}

pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(226, 232, 240),
        subsection_heading: Color32::from_rgb(148, 163, 184),
        central_panel: Color32::from_rgb(15, 23, 42),
        side_panel: Color32::from_rgb(30, 41, 59),
        chart_card: Color32::from_rgb(17, 27, 48),
        chart_border: Color32::from_rgb(51, 65, 85),
    },
    chart: ChartLayout {
        min_plot_height: 120.0,
        reserve_with_slider: 90.0,
        reserve_readout_only: 30.0,
        gap_before_slider: 6.0,
    },
    title_size: 16.0,
    tab_font_size: 13.0,
    tab_padding: Vec2::new(6.0, 4.0),
    scatter_hover_reach: 0.03,
    placeholder_top_space: 40.0,
};

impl UiConfig {
    pub fn top_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    /// Status bar: tighter vertical padding than the toolbar
    pub fn bottom_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::symmetric(8, 4),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(12),
            ..Default::default()
        }
    }

    /// Card drawn behind each plot
    pub fn chart_frame(&self) -> Frame {
        Frame {
            fill: self.colors.chart_card,
            stroke: Stroke::new(1.0, self.colors.chart_border),
            corner_radius: CornerRadius::same(6),
            inner_margin: Margin::same(6),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_height_never_drops_below_minimum() {
        let chart = UI_CONFIG.chart;
        assert_eq!(chart.plot_height(500.0, true), 410.0);
        assert_eq!(chart.plot_height(500.0, false), 470.0);
        assert_eq!(chart.plot_height(50.0, true), chart.min_plot_height);
    }
}
