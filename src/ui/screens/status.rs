use eframe::egui::{RichText, Ui};

use crate::{
    app::ViewStatus,
    config::PLOT_CONFIG,
    data::FetchError,
    ui::{UI_CONFIG, UI_TEXT, UiStyleExt},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusAction {
    None,
    Retry,
}

/// Draws the loading / empty / error placeholder for a view. Returns `Retry` when the user asks
/// for another attempt. Views in `Ready` draw nothing here.
pub(crate) fn render_view_status(ui: &mut Ui, status: &ViewStatus) -> StatusAction {
    let mut action = StatusAction::None;
    match status {
        ViewStatus::Idle | ViewStatus::Loading => {
            ui.vertical_centered(|ui| {
                ui.add_space(UI_CONFIG.placeholder_top_space);
                ui.spinner();
                ui.add_space(8.0);
                ui.label(
                    RichText::new(&UI_TEXT.label_loading)
                        .italics()
                        .color(PLOT_CONFIG.color_text_neutral),
                );
            });
        }
        ViewStatus::Empty => {
            ui.vertical_centered(|ui| {
                ui.add_space(UI_CONFIG.placeholder_top_space);
                ui.label(
                    RichText::new(&UI_TEXT.label_no_data)
                        .size(18.0)
                        .color(PLOT_CONFIG.color_warning),
                );
                ui.label_subdued(&UI_TEXT.label_no_data_hint);
                ui.add_space(8.0);
                if ui.button(&UI_TEXT.label_reload).clicked() {
                    action = StatusAction::Retry;
                }
            });
        }
        ViewStatus::Failed(err) => {
            action = render_error_banner(ui, err);
        }
        ViewStatus::Ready => {}
    }
    action
}

pub(crate) fn render_error_banner(ui: &mut Ui, err: &FetchError) -> StatusAction {
    let mut action = StatusAction::None;
    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.label(
            RichText::new(&UI_TEXT.label_fetch_failed)
                .size(18.0)
                .strong()
                .color(PLOT_CONFIG.color_error),
        );
        ui.label(RichText::new(err.to_string()).color(PLOT_CONFIG.color_text_primary));
        ui.add_space(8.0);
        if ui.button(&UI_TEXT.label_retry).clicked() {
            action = StatusAction::Retry;
        }
    });
    action
}
