use eframe::egui::{
    Align, Align2, Color32, FontId, Layout, Rect, RichText, Sense, Stroke, StrokeKind, Ui, pos2,
    vec2,
};

use crate::{
    config::PLOT_CONFIG,
    models::{DragHandle, RangeSelector},
    ui::{UI_TEXT, UiStyleExt},
};

/// Two-handle date range slider drawn over a [`RangeSelector`].
pub(crate) struct RangeSlider<'a, F>
where
    F: Fn(usize) -> String,
{
    selector: &'a mut RangeSelector,
    label_at: F,
}

impl<'a, F> RangeSlider<'a, F>
where
    F: Fn(usize) -> String,
{
    /// `label_at` names the series element at an index (usually its date).
    pub(crate) fn new(selector: &'a mut RangeSelector, label_at: F) -> Self {
        Self { selector, label_at }
    }

    fn handle_x(&self, rect: Rect, index: usize) -> f32 {
        rect.min.x + (self.selector.position_pct(index) / 100.0) as f32 * rect.width()
    }

    /// Returns true when the selection changed this frame.
    pub(crate) fn show(self, ui: &mut Ui) -> bool {
        let Some(range) = self.selector.range() else {
            return false;
        };

        // Dates sit above the track; during a drag they trail the handles by one frame
        ui.horizontal(|ui| {
            ui.label(RichText::new((self.label_at)(range.start)).small().strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(RichText::new((self.label_at)(range.end)).small().strong());
                ui.label_subdued(format!("{} ", UI_TEXT.label_range));
            });
        });

        let (rect, response) = ui.allocate_exact_size(
            vec2(ui.available_width(), PLOT_CONFIG.slider_height),
            Sense::click_and_drag(),
        );

        let mut changed = false;
        let pointer_frac = response
            .interact_pointer_pos()
            .map(|p| ((p.x - rect.min.x) / rect.width()) as f64);

        if let Some(frac) = pointer_frac {
            if response.drag_started() || response.clicked() {
                // Grab whichever handle is closer to the pointer
                let px = rect.min.x + frac as f32 * rect.width();
                let to_start = (px - self.handle_x(rect, range.start)).abs();
                let to_end = (px - self.handle_x(rect, range.end)).abs();
                let handle = if to_start <= to_end {
                    DragHandle::Start
                } else {
                    DragHandle::End
                };
                self.selector.begin_drag(handle);
            }
            if response.dragged() || response.clicked() {
                changed |= self.selector.drag_to_fraction(frac);
            }
        }
        if response.drag_stopped() || response.clicked() {
            self.selector.end_drag();
        }

        let range = self.selector.range().unwrap_or(range);

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 2.0, PLOT_CONFIG.color_widget_background);
            painter.rect_stroke(
                rect,
                2.0,
                Stroke::new(1.0, PLOT_CONFIG.color_widget_border),
                StrokeKind::Inside,
            );

            let x_start = self.handle_x(rect, range.start);
            let x_end = self.handle_x(rect, range.end);
            let selection = Rect::from_min_max(
                pos2(x_start, rect.min.y + 2.0),
                pos2(x_end.max(x_start + 1.0), rect.max.y - 2.0),
            );
            painter.rect_filled(selection, 0.0, PLOT_CONFIG.color_selection_fill);

            let active = self.selector.dragging();
            for (handle, x) in [(DragHandle::Start, x_start), (DragHandle::End, x_end)] {
                let color = if active == Some(handle) {
                    PLOT_CONFIG.color_handle_active
                } else {
                    PLOT_CONFIG.color_handle
                };
                let handle_rect = Rect::from_center_size(
                    pos2(x, rect.center().y),
                    vec2(PLOT_CONFIG.slider_handle_width, rect.height()),
                );
                painter.rect_filled(handle_rect, 2.0, color);
            }

            if self.selector.len() > 0 {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    format!("{} {}", range.day_count(), UI_TEXT.label_days),
                    FontId::proportional(11.0),
                    Color32::from_white_alpha(200),
                );
            }
        }

        changed
    }
}
