//! QR payload encoding: matrix from `qrcode`, raster and PNG from `image`.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ExtendedColorType, ImageEncoder as _, codecs::png::PngEncoder};
use qrcode::{Color, EcLevel, QrCode};
use thiserror::Error;

const DARK: u8 = 0;
const LIGHT: u8 = 255;

#[derive(Debug, Error)]
pub enum QrEncodeError {
    #[error("failed to build QR matrix: {0}")]
    Matrix(#[from] qrcode::types::QrError),
    #[error("{width}px is too small for {modules} modules")]
    TooSmall { width: u32, modules: usize },
    #[error("failed to encode PNG: {0}")]
    Png(#[from] image::ImageError),
    #[error("encoding task failed: {0}")]
    Task(String),
}

/// Output size and quiet zone of the rendered code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    /// Edge of the square image, in pixels.
    pub width: u32,
    /// Quiet zone around the code, in modules.
    pub margin: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            width: 300,
            margin: 2,
        }
    }
}

/// A rendered QR code: grayscale pixels for display, PNG bytes for download.
#[derive(Clone, PartialEq, Eq)]
pub struct QrPayload {
    text: String,
    options: QrOptions,
    pixels: Vec<u8>,
    png: Vec<u8>,
}

impl std::fmt::Debug for QrPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrPayload")
            .field("text", &self.text)
            .field("options", &self.options)
            .field("png_bytes", &self.png.len())
            .finish()
    }
}

impl QrPayload {
    /// The encoded string.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> u32 {
        self.options.width
    }

    /// Width and margin this payload was rendered with.
    pub fn options(&self) -> QrOptions {
        self.options
    }

    /// Row-major 8-bit luma, `size * size` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Encodes `data` into a square `options.width` pixel image with an `options.margin`
/// module quiet zone. Pixels sample the module underneath them, so the image is always
/// exactly `options.width` wide even when it is not a multiple of the module count.
pub fn encode_qr_payload(data: &str, options: QrOptions) -> Result<QrPayload, QrEncodeError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
    let modules = code.width();
    let margin = options.margin as usize;
    let total = modules + 2 * margin;
    let size = options.width as usize;

    if size < total {
        return Err(QrEncodeError::TooSmall {
            width: options.width,
            modules: total,
        });
    }

    let colors = code.to_colors();
    let code_area = margin..margin + modules;
    let is_dark = |mx: usize, my: usize| {
        code_area.contains(&mx)
            && code_area.contains(&my)
            && colors[(my - margin) * modules + (mx - margin)] == Color::Dark
    };

    let mut pixels = vec![LIGHT; size * size];
    for py in 0..size {
        let my = py * total / size;
        for px in 0..size {
            let mx = px * total / size;
            if is_dark(mx, my) {
                pixels[py * size + px] = DARK;
            }
        }
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        &pixels,
        options.width,
        options.width,
        ExtendedColorType::L8,
    )?;

    Ok(QrPayload {
        text: data.to_owned(),
        options,
        pixels,
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn renders_exact_width_png() {
        let payload =
            encode_qr_payload("https://magma.am/?utm_source=x", QrOptions::default()).unwrap();

        assert_eq!(payload.size(), 300);
        assert_eq!(payload.pixels().len(), 300 * 300);
        assert!(payload.png().starts_with(&PNG_MAGIC));
        assert_eq!(payload.text(), "https://magma.am/?utm_source=x");
    }

    #[test]
    fn quiet_zone_is_light() {
        let payload = encode_qr_payload("https://magma.am/", QrOptions::default()).unwrap();
        let size = payload.size() as usize;

        // first row and first column sit in the margin
        assert!(payload.pixels()[..size].iter().all(|p| *p == LIGHT));
        assert!(payload.pixels().iter().step_by(size).all(|p| *p == LIGHT));

        // the first dark pixel is the top-left finder corner, on the diagonal
        let first_dark = payload.pixels().iter().position(|p| *p == DARK).unwrap();
        let (x, y) = (first_dark % size, first_dark / size);
        assert_eq!(x, y);
        assert!(x > 0);
    }

    #[test]
    fn decoded_png_matches_pixels() {
        let payload = encode_qr_payload("https://magma.am/", QrOptions::default()).unwrap();
        let decoded = image::load_from_memory(payload.png()).unwrap().to_luma8();

        assert_eq!(decoded.width(), 300);
        assert_eq!(decoded.as_raw().as_slice(), payload.pixels());
    }

    #[test]
    fn too_small_width_is_an_error() {
        let options = QrOptions {
            width: 10,
            margin: 2,
        };
        assert!(matches!(
            encode_qr_payload("https://magma.am/", options),
            Err(QrEncodeError::TooSmall { width: 10, .. })
        ));
    }

    #[test]
    fn oversized_data_is_an_error() {
        let data = "x".repeat(8000);
        assert!(matches!(
            encode_qr_payload(&data, QrOptions::default()),
            Err(QrEncodeError::Matrix(_))
        ));
    }

    #[test]
    fn data_url_is_base64_png() {
        let payload = encode_qr_payload("https://magma.am/", QrOptions::default()).unwrap();
        let data_url = payload.to_data_url();
        let encoded = data_url.strip_prefix("data:image/png;base64,").unwrap();

        assert_eq!(STANDARD.decode(encoded).unwrap(), payload.png());
    }
}
