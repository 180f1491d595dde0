mod correlation_panel;
mod distribution_panel;
mod futures_panel;
mod range_slider;
mod screens;
mod styles;
mod ui_config;
mod ui_render;
mod ui_text;

pub(crate) use range_slider::RangeSlider;

pub(crate) use screens::{StatusAction, render_error_banner, render_view_status};

pub(crate) use styles::{
    ShapeColor, UiStyleExt, apply_opacity, get_change_color,
};

pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
