use chrono::Local;
use egui::{Button, Color32, RichText, Ui};
use source_states::StateCtx;

use crate::utils::{
    clipboard::{copy_feedback_remaining, copy_link},
    colors::{COLOR_BLUE, COLOR_GREEN, COLOR_PURPLE},
    download::{DownloadOutcome, QrDownloader, download_qr_code, ready_payload},
};

pub const COPY_LABEL: &str = "Copy Link";
pub const COPIED_LABEL: &str = "Copied!";
pub const DOWNLOAD_QR_LABEL: &str = "Download QR Code";

fn filled_button(text: String, fill: Color32) -> Button<'static> {
    Button::new(RichText::new(text).color(Color32::WHITE).strong()).fill(fill)
}

/// "Copy Link" and "Download QR Code".
///
/// The copy button turns into "Copied!" for the configured feedback duration, and
/// the download button stays disabled until a QR code for the current link is ready.
pub fn action_bar(state_ctx: &mut StateCtx, ui: &mut Ui, downloader: &dyn QrDownloader) {
    ui.horizontal(|ui| {
        let copy_button = match copy_feedback_remaining(state_ctx) {
            Some(remaining) => {
                // repaint once more so the label reverts without input
                ui.ctx()
                    .request_repaint_after(remaining.to_std().unwrap_or_default());
                filled_button(format!("✔ {COPIED_LABEL}"), COLOR_GREEN)
            }
            None => filled_button(format!("📋 {COPY_LABEL}"), COLOR_BLUE),
        };
        if ui.add(copy_button).clicked() {
            copy_link(ui.ctx(), state_ctx);
        }

        let can_download = ready_payload(state_ctx).is_some();
        let download_button = filled_button(format!("⬇ {DOWNLOAD_QR_LABEL}"), COLOR_PURPLE);
        if ui.add_enabled(can_download, download_button).clicked() {
            let today = Local::now().date_naive();
            match download_qr_code(downloader, state_ctx, today) {
                Ok(Some(DownloadOutcome::Cancelled)) => log::debug!("QR download cancelled"),
                Ok(_) => {}
                Err(err) => log::warn!("QR download failed: {err}"),
            }
        }
    });
}
