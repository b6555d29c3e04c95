use egui::{ColorImage, Image, RichText, TextureHandle, TextureOptions, Ui, Vec2};
use source_business::{QrCodeCompute, QrCodeStatus, QrPayload};

use crate::{
    state::State,
    utils::colors::{COLOR_MUTED, COLOR_PURPLE},
};

/// On-screen size of the QR code; the downloaded PNG keeps its own width.
const QR_DISPLAY_SIZE: f32 = 200.0;

pub const SCAN_HINT: &str = "Scan to open your campaign link";
pub const ENCODING_TEXT: &str = "Generating QR code...";
pub const EMPTY_TEXT: &str = "Your QR code will appear once the link is valid";
pub const FAILED_TEXT: &str = "QR code unavailable for this link";

/// Uploads the payload as a texture, reusing the previous one while the link is unchanged.
fn qr_texture<'a>(
    egui_ctx: &egui::Context,
    cache: &'a mut Option<(String, TextureHandle)>,
    payload: &QrPayload,
) -> &'a TextureHandle {
    if cache
        .as_ref()
        .is_some_and(|(text, _)| text != payload.text())
    {
        *cache = None;
    }

    let (_, handle) = cache.get_or_insert_with(|| {
        let size = payload.size() as usize;
        let image = ColorImage::from_gray([size, size], payload.pixels());
        log::debug!("Uploading {size}x{size} QR texture");
        (
            payload.text().to_owned(),
            egui_ctx.load_texture("qr_code", image, TextureOptions::NEAREST),
        )
    });
    handle
}

pub fn qr_preview(state: &mut State, ui: &mut Ui) {
    let State { ctx, qr_texture: cache } = state;

    let status = ctx.cached::<QrCodeCompute>().map(QrCodeCompute::status);

    ui.vertical_centered(|ui| match status {
        Some(QrCodeStatus::Ready(payload)) => {
            let texture = qr_texture(ui.ctx(), cache, payload);
            ui.add(Image::from_texture(texture).fit_to_exact_size(Vec2::splat(QR_DISPLAY_SIZE)));
            ui.label(RichText::new(SCAN_HINT).color(COLOR_MUTED));
        }
        Some(QrCodeStatus::Encoding { .. }) => {
            ui.spinner();
            ui.label(RichText::new(ENCODING_TEXT).color(COLOR_MUTED));
        }
        Some(QrCodeStatus::Failed { error, .. }) => {
            ui.label(RichText::new(FAILED_TEXT).color(COLOR_PURPLE))
                .on_hover_text(error.as_str());
        }
        Some(QrCodeStatus::Idle) | None => {
            *cache = None;
            ui.label(RichText::new(EMPTY_TEXT).color(COLOR_MUTED));
        }
    });
}
