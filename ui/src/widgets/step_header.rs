use egui::{Align2, Color32, FontId, Response, RichText, Sense, Ui, vec2};

use crate::utils::colors::COLOR_BLUE;

/// Radius of the numbered circle (in pixels)
const STEP_NUMBER_RADIUS: f32 = 11.0;

/// Numbered circle followed by the step title.
///
/// Returns the title's response so the step's input can be labelled by it.
pub fn step_header(ui: &mut Ui, number: u8, title: &str) -> Response {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(
            vec2(STEP_NUMBER_RADIUS * 2.0, STEP_NUMBER_RADIUS * 2.0),
            Sense::hover(),
        );
        let painter = ui.painter();
        painter.circle_filled(rect.center(), STEP_NUMBER_RADIUS, COLOR_BLUE);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            number.to_string(),
            FontId::proportional(12.0),
            Color32::WHITE,
        );

        ui.label(RichText::new(title).strong())
    })
    .inner
}
