use chrono::Utc;
use source_states::Time;

use crate::{
    state::State,
    utils::{
        colors::COLOR_BACKGROUND,
        download::{QrDownloader, SystemQrDownloader},
    },
    widgets,
};

pub const APP_TITLE: &str = "Magma relation source builder";

/// Widest the content column grows on large windows.
const CONTENT_MAX_WIDTH: f32 = 860.0;

pub struct SourceBuilderApp {
    state: State,
    downloader: Box<dyn QrDownloader>,
}

impl SourceBuilderApp {
    /// Called once before the first frame.
    pub fn new(egui_ctx: &egui::Context, state: State) -> Self {
        Self::with_downloader(egui_ctx, state, Box::new(SystemQrDownloader))
    }

    pub fn with_downloader(
        egui_ctx: &egui::Context,
        mut state: State,
        downloader: Box<dyn QrDownloader>,
    ) -> Self {
        egui_ctx.set_visuals(egui::Visuals::light());
        state.repaint_on_update(egui_ctx);
        Self { state, downloader }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for SourceBuilderApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Utc::now();
        self.state.ctx.update::<Time>(|time| *time.as_mut() = now);

        // Sync Compute for render
        self.state.ctx.sync_computes();

        let panel_frame = egui::Frame::central_panel(&ctx.style()).fill(COLOR_BACKGROUND);
        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink(false)
                    .show(ui, |ui| {
                        ui.set_max_width(CONTENT_MAX_WIDTH);

                        widgets::card(ui, |ui| {
                            ui.heading(APP_TITLE);
                            ui.add_space(16.0);
                            widgets::link_form(&mut self.state.ctx, ui);
                            ui.add_space(12.0);
                            widgets::action_bar(&mut self.state.ctx, ui, self.downloader.as_ref());
                            ui.add_space(16.0);
                            widgets::qr_preview(&mut self.state, ui);
                        });

                        ui.add_space(16.0);

                        widgets::card(ui, |ui| {
                            widgets::relations_table(&self.state.ctx, ui);
                        });
                    });
            });

        // Run computes whose inputs changed this frame
        self.state.ctx.run_computed();
    }
}
