//! Copying the composed link to the system clipboard.
//!
//! egui forwards `copy_text` to the platform clipboard on native and on the web.

use chrono::TimeDelta;
use log::{debug, info};
use source_business::{BuilderConfig, ComposedUrl, CopyFeedback};
use source_states::{StateCtx, Time};

/// Copies the current campaign link and starts the "Copied!" acknowledgment.
///
/// Returns `false` without touching the clipboard when there is no link yet.
pub fn copy_link(egui_ctx: &egui::Context, state_ctx: &mut StateCtx) -> bool {
    let Some(url) = state_ctx
        .cached::<ComposedUrl>()
        .and_then(ComposedUrl::url)
        .map(str::to_owned)
    else {
        debug!("Copy ignored, no campaign link yet");
        return false;
    };

    egui_ctx.copy_text(url.clone());

    let now = *state_ctx.state::<Time>().as_ref();
    state_ctx.update::<CopyFeedback>(|feedback| feedback.mark_copied(now));
    info!("Copied campaign link {url}");
    true
}

/// Time left on the "Copied!" acknowledgment, `None` once it reverted.
pub fn copy_feedback_remaining(state_ctx: &StateCtx) -> Option<TimeDelta> {
    let now = *state_ctx.state::<Time>().as_ref();
    let duration = state_ctx.state::<BuilderConfig>().copy_feedback();
    state_ctx.state::<CopyFeedback>().remaining(now, duration)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use source_business::UtmInput;

    use super::*;
    use crate::state::State;
    use crate::test_utils::copied_texts;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_717_200_000 + secs, 0).unwrap()
    }

    #[tokio::test]
    async fn copy_without_link_is_a_no_op() {
        let mut state = State::test();
        let egui_ctx = egui::Context::default();

        let mut copied = true;
        let output = egui_ctx.run(egui::RawInput::default(), |ctx| {
            copied = copy_link(ctx, &mut state.ctx);
        });

        assert!(!copied);
        assert!(copied_texts(&output).is_empty());
        assert!(copy_feedback_remaining(&state.ctx).is_none());
    }

    #[tokio::test]
    async fn copy_starts_feedback_that_reverts() {
        let mut state = State::test();
        let egui_ctx = egui::Context::default();
        state.ctx.update::<Time>(|time| *time.as_mut() = at(0));
        state.ctx.update::<UtmInput>(|input| {
            input.page_url = "https://magma.am/".to_owned();
            input.source = "newsletter-juin".to_owned();
        });
        state.ctx.settle();

        let mut copied = false;
        let output = egui_ctx.run(egui::RawInput::default(), |ctx| {
            copied = copy_link(ctx, &mut state.ctx);
        });

        assert!(copied);
        assert_eq!(
            copied_texts(&output),
            vec!["https://magma.am/?utm_source=newsletter-juin"]
        );
        assert_eq!(
            copy_feedback_remaining(&state.ctx),
            Some(TimeDelta::seconds(2))
        );

        state.ctx.update::<Time>(|time| *time.as_mut() = at(2));
        assert!(copy_feedback_remaining(&state.ctx).is_none());
    }
}
