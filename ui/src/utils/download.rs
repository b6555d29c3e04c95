//! Saving the QR code as a PNG file.
//!
//! The platform side is behind [`QrDownloader`] so widgets can be tested without
//! opening a system dialog.
//!
//! # Platform Support
//!
//! - **Native (Windows, macOS, Linux)**: a save dialog via `rfd`, then the PNG bytes
//!   are written to the chosen path.
//! - **Web (WASM)**: a temporary `<a download>` element pointing at a `data:` URL is
//!   clicked, which hands the file to the browser's download manager.

use chrono::NaiveDate;
use source_business::{ComposedUrl, QrCodeCompute, QrPayload, UtmInput, qr_file_name};
use source_states::StateCtx;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("failed to write QR code: {0}")]
    Io(#[from] std::io::Error),
    #[error("browser download failed: {0}")]
    Browser(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved,
    /// The user closed the save dialog.
    Cancelled,
}

/// Trait for handling the QR download, enabling mock implementations for testing.
pub trait QrDownloader {
    fn save(&self, file_name: &str, payload: &QrPayload)
    -> Result<DownloadOutcome, DownloadError>;
}

/// Default downloader using the platform's save mechanism.
#[derive(Debug, Default)]
pub struct SystemQrDownloader;

#[cfg(not(target_arch = "wasm32"))]
impl QrDownloader for SystemQrDownloader {
    fn save(
        &self,
        file_name: &str,
        payload: &QrPayload,
    ) -> Result<DownloadOutcome, DownloadError> {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(file_name)
            .add_filter("PNG image", &["png"])
            .save_file()
        else {
            return Ok(DownloadOutcome::Cancelled);
        };

        std::fs::write(&path, payload.png())?;
        log::info!("Saved QR code to {}", path.display());
        Ok(DownloadOutcome::Saved)
    }
}

#[cfg(target_arch = "wasm32")]
impl QrDownloader for SystemQrDownloader {
    fn save(
        &self,
        file_name: &str,
        payload: &QrPayload,
    ) -> Result<DownloadOutcome, DownloadError> {
        use wasm_bindgen::JsCast as _;

        let browser_err = |err: wasm_bindgen::JsValue| DownloadError::Browser(format!("{err:?}"));

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DownloadError::Browser("no document".to_owned()))?;
        let body = document
            .body()
            .ok_or_else(|| DownloadError::Browser("no document body".to_owned()))?;

        let anchor = document
            .create_element("a")
            .map_err(browser_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| DownloadError::Browser("created element is not an anchor".to_owned()))?;
        anchor.set_href(&payload.to_data_url());
        anchor.set_download(file_name);

        body.append_child(&anchor).map_err(browser_err)?;
        anchor.click();
        anchor.remove();

        log::info!("Started browser download of {file_name}");
        Ok(DownloadOutcome::Saved)
    }
}

/// Saves the current QR code, named after `today` and the source label.
///
/// A no-op returning `Ok(None)` when no QR code is ready for the current link.
pub fn download_qr_code(
    downloader: &dyn QrDownloader,
    state_ctx: &StateCtx,
    today: NaiveDate,
) -> Result<Option<DownloadOutcome>, DownloadError> {
    let Some(payload) = ready_payload(state_ctx) else {
        log::debug!("Download ignored, no QR code ready");
        return Ok(None);
    };

    let file_name = qr_file_name(today, &state_ctx.state::<UtmInput>().source);
    downloader.save(&file_name, payload).map(Some)
}

/// The QR payload, but only if it encodes the link currently shown.
pub fn ready_payload(state_ctx: &StateCtx) -> Option<&QrPayload> {
    let url = state_ctx.cached::<ComposedUrl>()?.url()?;
    state_ctx
        .cached::<QrCodeCompute>()?
        .payload()
        .filter(|payload| payload.text() == url)
}
