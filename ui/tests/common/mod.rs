use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use egui::accesskit::Role;
use egui_kittest::Harness;
use kittest::Queryable;
use source_business::QrPayload;
use source_ui::SourceBuilderApp;
use source_ui::state::State;
use source_ui::utils::download::{DownloadError, DownloadOutcome, QrDownloader};

/// Frames to step after an input so computes and their results reach the screen.
pub const UI_PROPAGATION_FRAMES: usize = 4;

/// Downloader that records what would have been saved.
#[derive(Clone, Default)]
pub struct RecordingDownloader {
    pub saved: Rc<RefCell<Vec<String>>>,
}

impl QrDownloader for RecordingDownloader {
    fn save(
        &self,
        file_name: &str,
        payload: &QrPayload,
    ) -> Result<DownloadOutcome, DownloadError> {
        assert!(!payload.png().is_empty(), "downloaded PNG should not be empty");
        self.saved.borrow_mut().push(file_name.to_owned());
        Ok(DownloadOutcome::Saved)
    }
}

pub struct TestCtx<'a> {
    harness: Harness<'a, SourceBuilderApp>,
    downloader: RecordingDownloader,
}

impl<'a> TestCtx<'a> {
    pub fn new_app() -> Self {
        let downloader = RecordingDownloader::default();
        let app_downloader = downloader.clone();
        let harness = Harness::new_eframe(move |cc| {
            SourceBuilderApp::with_downloader(&cc.egui_ctx, State::test(), Box::new(app_downloader))
        });

        Self {
            harness,
            downloader,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, SourceBuilderApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn saved_files(&self) -> Vec<String> {
        self.downloader.saved.borrow().clone()
    }

    pub fn step_frames(&mut self) {
        for _ in 0..UI_PROPAGATION_FRAMES {
            self.harness.step();
        }
    }

    /// Focuses the `nth` single-line text input and types `text` into it.
    pub fn type_into(&mut self, nth: usize, text: &str) {
        self.harness
            .query_all_by_role(Role::TextInput)
            .nth(nth)
            .unwrap_or_else(|| panic!("no text input #{nth}"))
            .focus();
        self.harness.step();

        self.harness
            .query_all_by_role(Role::TextInput)
            .nth(nth)
            .unwrap_or_else(|| panic!("no text input #{nth}"))
            .type_text(text);
        self.step_frames();
    }

    /// Steps until `label` shows up, giving background encoding time to finish.
    #[allow(unused)]
    pub async fn wait_for_label(&mut self, label: &str) -> bool {
        for _ in 0..100 {
            self.harness.step();
            if self.harness.query_by_label_contains(label).is_some() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }
}

/// Text the last frame asked the platform to put on the clipboard.
#[allow(unused)]
pub fn copied_texts(output: &egui::FullOutput) -> Vec<&str> {
    output
        .platform_output
        .commands
        .iter()
        .filter_map(|command| match command {
            egui::OutputCommand::CopyText(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
