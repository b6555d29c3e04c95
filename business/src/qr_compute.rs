//! QR code for the current campaign link.
//!
//! Encoding runs off the UI thread. The compute first publishes `Encoding { target }`,
//! then the spawned task publishes `Ready` or `Failed` for that same target. Results
//! for a target that is no longer current are refused in `assign_box`, so a slow encode
//! of an older link can never replace the code of the newer one.

use std::any::{Any, TypeId};

use log::{debug, info, warn};
use source_states::{Compute, ComputeDeps, Dep, Updater, spawn_task};

use crate::{
    BuilderConfig, ComposedUrl,
    qr::{QrEncodeError, QrOptions, QrPayload, encode_qr_payload},
};

#[derive(Debug, Clone, Default)]
pub enum QrCodeStatus {
    /// No campaign link, nothing to encode.
    #[default]
    Idle,
    Encoding {
        target: String,
        options: QrOptions,
    },
    Ready(QrPayload),
    Failed {
        target: String,
        options: QrOptions,
        error: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct QrCodeCompute {
    status: QrCodeStatus,
}

impl QrCodeCompute {
    pub fn new(status: QrCodeStatus) -> Self {
        Self { status }
    }

    pub fn status(&self) -> &QrCodeStatus {
        &self.status
    }

    pub fn payload(&self) -> Option<&QrPayload> {
        match &self.status {
            QrCodeStatus::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self.status, QrCodeStatus::Encoding { .. })
    }

    /// The link this compute is encoding, or has encoded / failed to encode.
    pub fn target(&self) -> Option<&str> {
        match &self.status {
            QrCodeStatus::Idle => None,
            QrCodeStatus::Encoding { target, .. } | QrCodeStatus::Failed { target, .. } => {
                Some(target)
            }
            QrCodeStatus::Ready(payload) => Some(payload.text()),
        }
    }

    /// Width and margin of the code for [`QrCodeCompute::target`].
    pub fn options(&self) -> Option<QrOptions> {
        match &self.status {
            QrCodeStatus::Idle => None,
            QrCodeStatus::Encoding { options, .. } | QrCodeStatus::Failed { options, .. } => {
                Some(*options)
            }
            QrCodeStatus::Ready(payload) => Some(payload.options()),
        }
    }

    /// Whether `next` may replace `self`.
    fn accepts(&self, next: &QrCodeCompute) -> bool {
        match (&self.status, &next.status) {
            (_, QrCodeStatus::Idle | QrCodeStatus::Encoding { .. }) => true,
            (QrCodeStatus::Encoding { target, options }, QrCodeStatus::Ready(payload)) => {
                payload.text() == target && payload.options() == *options
            }
            (
                QrCodeStatus::Encoding {
                    target: current,
                    options: current_options,
                },
                QrCodeStatus::Failed {
                    target, options, ..
                },
            ) => target == current && options == current_options,
            _ => false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn encode_off_thread(target: String, options: QrOptions) -> Result<QrPayload, QrEncodeError> {
    tokio::task::spawn_blocking(move || encode_qr_payload(&target, options))
        .await
        .map_err(|err| QrEncodeError::Task(err.to_string()))?
}

#[cfg(target_arch = "wasm32")]
async fn encode_off_thread(target: String, options: QrOptions) -> Result<QrPayload, QrEncodeError> {
    encode_qr_payload(&target, options)
}

impl Compute for QrCodeCompute {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 1] = [TypeId::of::<BuilderConfig>()];
        const COMPUTE_IDS: [TypeId; 1] = [TypeId::of::<ComposedUrl>()];
        (&STATE_IDS, &COMPUTE_IDS)
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let composed = deps.get_compute_ref::<ComposedUrl>();
        let options = deps.get_state_ref::<BuilderConfig>().qr_options();

        let Some(url) = composed.url() else {
            if !matches!(self.status, QrCodeStatus::Idle) {
                debug!("Campaign link cleared, dropping QR code");
                updater.set(QrCodeCompute::default());
            }
            return;
        };

        if self.target() == Some(url) && self.options() == Some(options) {
            return;
        }

        info!("Encoding QR code for {url}");
        let target = url.to_owned();
        updater.set(QrCodeCompute::new(QrCodeStatus::Encoding {
            target: target.clone(),
            options,
        }));

        spawn_task(async move {
            let status = match encode_off_thread(target.clone(), options).await {
                Ok(payload) => {
                    debug!("QR code ready for {target}: {} bytes", payload.png().len());
                    QrCodeStatus::Ready(payload)
                }
                Err(err) => {
                    warn!("QR encoding failed for {target}: {err}");
                    QrCodeStatus::Failed {
                        target,
                        options,
                        error: err.to_string(),
                    }
                }
            };
            updater.set(QrCodeCompute::new(status));
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) -> bool {
        let Ok(next) = new_self.downcast::<QrCodeCompute>() else {
            warn!("Ignored update with mismatched type for QrCodeCompute");
            return false;
        };
        if !self.accepts(&next) {
            debug!(
                "Discarded stale QR result for {:?}, current target is {:?}",
                next.target(),
                self.target()
            );
            return false;
        }
        *self = *next;
        true
    }
}
