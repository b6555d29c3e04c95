use source_business::{BuilderConfig, register};
use source_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    /// QR texture uploaded to egui, with the link it was rendered from.
    pub qr_texture: Option<(String, egui::TextureHandle)>,
}

impl Default for State {
    fn default() -> Self {
        Self::new(BuilderConfig::from_env())
    }
}

impl State {
    pub fn new(config: BuilderConfig) -> Self {
        let mut ctx = StateCtx::new();
        register(&mut ctx, config);

        if let Err(err) = ctx.verify_deps() {
            log::error!("Invalid compute dependencies: {err}");
        }

        Self {
            ctx,
            qr_texture: None,
        }
    }

    /// State with default configuration, ignoring the environment.
    pub fn test() -> Self {
        Self::new(BuilderConfig::default())
    }

    /// Repaint whenever a compute or background task publishes a value.
    pub fn repaint_on_update(&mut self, egui_ctx: &egui::Context) {
        let egui_ctx = egui_ctx.clone();
        self.ctx.set_waker(move || egui_ctx.request_repaint());
    }
}
