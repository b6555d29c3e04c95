use std::any::Any;

use chrono::TimeDelta;
use serde::Deserialize;
use source_states::{State, state_assign_impl};

use crate::QrOptions;

const DEFAULT_COPY_FEEDBACK_MS: u32 = 2000;

/// Optional overrides read from the process environment.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    source_builder_qr_width: Option<u32>,
    source_builder_qr_margin: Option<u32>,
    source_builder_copy_feedback_ms: Option<u32>,
}

impl RawConfig {
    fn merge(&mut self, other: RawConfig) {
        self.source_builder_qr_width = other
            .source_builder_qr_width
            .or(self.source_builder_qr_width);
        self.source_builder_qr_margin = other
            .source_builder_qr_margin
            .or(self.source_builder_qr_margin);
        self.source_builder_copy_feedback_ms = other
            .source_builder_copy_feedback_ms
            .or(self.source_builder_copy_feedback_ms);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    pub qr_width: u32,
    pub qr_margin: u32,
    /// How long "Copied!" stays on the copy button.
    pub copy_feedback_ms: u32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        let qr = QrOptions::default();
        Self {
            qr_width: qr.width,
            qr_margin: qr.margin,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
        }
    }
}

impl BuilderConfig {
    /// Defaults, overridden by `SOURCE_BUILDER_*` environment variables.
    ///
    /// Each variable is parsed on its own, so an unparsable one is skipped with a warning
    /// and only that setting keeps its default. Wasm builds always use defaults.
    pub fn from_env() -> Self {
        if cfg!(target_arch = "wasm32") {
            return Self::default();
        }
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = RawConfig::default();
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            if !key.starts_with("SOURCE_BUILDER_") {
                continue;
            }
            match serde_env::from_iter::<_, _, RawConfig>([(key, value)]) {
                Ok(single) => raw.merge(single),
                Err(err) => log::warn!("Ignoring {key}={value:?}: {err}"),
            }
        }

        let defaults = Self::default();
        let config = Self {
            qr_width: raw.source_builder_qr_width.unwrap_or(defaults.qr_width),
            qr_margin: raw.source_builder_qr_margin.unwrap_or(defaults.qr_margin),
            copy_feedback_ms: raw
                .source_builder_copy_feedback_ms
                .unwrap_or(defaults.copy_feedback_ms),
        };
        if config != defaults {
            log::info!("Using builder config from environment: {config:?}");
        }
        config
    }

    pub fn qr_options(&self) -> QrOptions {
        QrOptions {
            width: self.qr_width,
            margin: self.qr_margin,
        }
    }

    pub fn copy_feedback(&self) -> TimeDelta {
        TimeDelta::milliseconds(i64::from(self.copy_feedback_ms))
    }
}

impl State for BuilderConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
