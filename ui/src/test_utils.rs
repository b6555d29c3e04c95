use egui::accesskit::Role;
use egui_kittest::Harness;
use kittest::Queryable;

use crate::state::State;

pub struct TestCtx<'a, T = State> {
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
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
        self.harness.step();
    }
}

impl<'a> TestCtx<'a, State> {
    /// Renders `app` between the frame's `sync_computes` and `run_computed`, like the app does.
    pub fn new(mut app: impl FnMut(&mut egui::Ui, &mut State) + 'a) -> Self {
        let harness = Harness::new_ui_state(
            move |ui, state: &mut State| {
                state.ctx.sync_computes();
                app(ui, state);
                state.ctx.run_computed();
            },
            State::test(),
        );

        Self { harness }
    }
}

/// Text the frame asked the platform to put on the clipboard.
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
