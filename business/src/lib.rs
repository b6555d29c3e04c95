mod config;
mod copy_feedback;
mod download;
mod qr;
mod qr_compute;
mod relations_preview;
mod utm;

pub use config::BuilderConfig;
pub use copy_feedback::CopyFeedback;
pub use download::{DOWNLOAD_LABEL, FALLBACK_SOURCE, qr_file_name};
pub use qr::{QrEncodeError, QrOptions, QrPayload, encode_qr_payload};
pub use qr_compute::{QrCodeCompute, QrCodeStatus};
pub use relations_preview::RelationPreview;
pub use utm::{
    ComposeError, ComposedUrl, UTM_SOURCE_PARAM, UtmInput, compose_utm_url, try_compose_utm_url,
};

use source_states::{StateCtx, Time};

/// Registers every state and compute the builder needs.
pub fn register(ctx: &mut StateCtx, config: BuilderConfig) {
    ctx.add_state(Time::default());
    ctx.add_state(config);
    ctx.add_state(UtmInput::default());
    ctx.add_state(CopyFeedback::default());

    ctx.record_compute(ComposedUrl::default());
    ctx.record_compute(QrCodeCompute::default());
}
