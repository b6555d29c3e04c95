use egui::{Frame, Stroke, Ui};

use crate::utils::colors::{COLOR_CARD, COLOR_CARD_BORDER};

/// White rounded panel spanning the available width.
pub fn card<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    Frame::new()
        .fill(COLOR_CARD)
        .stroke(Stroke::new(1.0, COLOR_CARD_BORDER))
        .corner_radius(8.0)
        .inner_margin(20.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}
