//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    // --- DISTRIBUTION ---
    pub bar_color: Color32,
    pub bar_hover_color: Color32,
    /// Fraction of the bucket slot filled by a bar (0.0 to 1.0)
    pub bar_width_pct: f64,
    pub mean_line_color: Color32,
    pub median_line_color: Color32,
    pub marker_line_width: f32,

    // --- CORRELATION ---
    pub scatter_color: Color32,
    pub scatter_hover_color: Color32,
    pub scatter_radius: f32,
    pub scatter_hover_radius: f32,
    pub trend_line_color: Color32,
    pub trend_line_width: f32,
    pub zero_line_color: Color32,

    // --- FUTURES ---
    pub curve_line_color: Color32,
    pub curve_line_width: f32,
    pub curve_point_radius: f32,

    // --- RANGE SLIDER ---
    pub slider_height: f32,
    pub slider_handle_width: f32,

    // --- SEMANTIC COLORS ---
    pub color_contango: Color32,
    pub color_backwardation: Color32,
    pub color_info: Color32,
    pub color_warning: Color32,
    pub color_error: Color32,

    pub color_text_neutral: Color32, // Main values (white)
    pub color_text_primary: Color32,
    pub color_text_subdued: Color32,

    // UI WIDGET STYLES
    pub color_widget_background: Color32, // Dark background for custom widgets
    pub color_widget_border: Color32,     // Subtle border
    pub color_selection_fill: Color32,
    pub color_handle: Color32,
    pub color_handle_active: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    bar_color: Color32::from_rgb(59, 130, 246),        // Blue
    bar_hover_color: Color32::from_rgb(147, 197, 253), // Light blue
    bar_width_pct: 0.85,
    mean_line_color: Color32::from_rgb(251, 191, 36), // Amber
    median_line_color: Color32::from_rgb(52, 211, 153), // Emerald
    marker_line_width: 1.5,

    scatter_color: Color32::from_rgba_premultiplied(53, 91, 137, 140),
    scatter_hover_color: Color32::from_rgb(255, 255, 255),
    scatter_radius: 2.0,
    scatter_hover_radius: 5.0,
    trend_line_color: Color32::from_rgb(239, 68, 68), // Red
    trend_line_width: 2.0,
    zero_line_color: Color32::from_gray(90),

    curve_line_color: Color32::from_rgb(168, 85, 247), // Purple
    curve_line_width: 2.5,
    curve_point_radius: 4.0,

    slider_height: 28.0,
    slider_handle_width: 8.0,

    color_contango: Color32::from_rgb(34, 197, 94),
    color_backwardation: Color32::from_rgb(239, 68, 68),
    color_info: Color32::from_rgb(100, 200, 255),
    color_warning: Color32::from_rgb(255, 165, 0),
    color_error: Color32::from_rgb(248, 113, 113),

    color_text_neutral: Color32::WHITE,
    color_text_primary: Color32::LIGHT_GRAY,
    color_text_subdued: Color32::GRAY,

    color_widget_background: Color32::from_gray(20),
    color_widget_border: Color32::from_gray(60),
    color_selection_fill: Color32::from_rgba_premultiplied(16, 36, 68, 70),
    color_handle: Color32::from_gray(200),
    color_handle_active: Color32::WHITE,
};
