//! The three numbered steps: campaign link, source, and the resulting link.

use egui::{TextEdit, Ui};
use source_business::{ComposedUrl, UtmInput};
use source_states::StateCtx;

use super::step_header;

pub const PAGE_URL_STEP: &str = "Provide campaign link";
pub const SOURCE_STEP: &str = "Indicate the source you want to be displayed";
pub const OUTPUT_STEP: &str = "That's it, here is the link you can use";

const PAGE_URL_HINT: &str = "https://magma.am/";
const SOURCE_HINT: &str = "newsletter-juin";
const OUTPUT_HINT: &str = "Your link will appear here...";

const STEP_SPACING: f32 = 14.0;

pub fn link_form(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let UtmInput {
        mut page_url,
        mut source,
    } = state_ctx.state::<UtmInput>().clone();

    let title = step_header(ui, 1, PAGE_URL_STEP);
    let page_url_changed = ui
        .add(
            TextEdit::singleline(&mut page_url)
                .hint_text(PAGE_URL_HINT)
                .desired_width(f32::INFINITY),
        )
        .labelled_by(title.id)
        .changed();
    ui.add_space(STEP_SPACING);

    let title = step_header(ui, 2, SOURCE_STEP);
    let source_changed = ui
        .add(
            TextEdit::singleline(&mut source)
                .hint_text(SOURCE_HINT)
                .desired_width(f32::INFINITY),
        )
        .labelled_by(title.id)
        .changed();
    ui.add_space(STEP_SPACING);

    if page_url_changed || source_changed {
        state_ctx.update::<UtmInput>(|input| {
            input.page_url = page_url;
            input.source = source;
        });
    }

    let title = step_header(ui, 3, OUTPUT_STEP);
    let mut link = state_ctx
        .cached::<ComposedUrl>()
        .and_then(ComposedUrl::url)
        .unwrap_or_default();
    ui.add(
        TextEdit::multiline(&mut link)
            .hint_text(OUTPUT_HINT)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    )
    .labelled_by(title.id);
}

#[cfg(test)]
mod link_form_widget_test {
    use kittest::Queryable;
    use source_business::ComposedUrl;

    use super::{OUTPUT_STEP, PAGE_URL_STEP, SOURCE_STEP};
    use crate::test_utils::TestCtx;

    fn composed(ctx: &mut TestCtx<'_>) -> Option<String> {
        ctx.harness_mut()
            .state()
            .ctx
            .cached::<ComposedUrl>()
            .and_then(ComposedUrl::url)
            .map(str::to_owned)
    }

    #[tokio::test]
    async fn test_renders_three_steps() {
        let mut ctx = TestCtx::new(|ui, state| {
            super::link_form(&mut state.ctx, ui);
        });

        let harness = ctx.harness_mut();
        harness.step();

        for step in [PAGE_URL_STEP, SOURCE_STEP, OUTPUT_STEP] {
            assert!(
                harness.query_all_by_label(step).next().is_some(),
                "step {step:?} should be rendered"
            );
        }
    }

    #[tokio::test]
    async fn test_typing_composes_link() {
        let mut ctx = TestCtx::new(|ui, state| {
            super::link_form(&mut state.ctx, ui);
        });
        ctx.harness_mut().step();

        ctx.type_into(0, "https://magma.am/");
        ctx.type_into(1, "newsletter-juin");

        let harness = ctx.harness_mut();
        harness.step();
        harness.step();

        assert_eq!(
            composed(&mut ctx).as_deref(),
            Some("https://magma.am/?utm_source=newsletter-juin")
        );
    }

    #[tokio::test]
    async fn test_invalid_link_leaves_output_empty() {
        let mut ctx = TestCtx::new(|ui, state| {
            super::link_form(&mut state.ctx, ui);
        });
        ctx.harness_mut().step();

        ctx.type_into(0, "not a url");
        ctx.type_into(1, "x");

        let harness = ctx.harness_mut();
        harness.step();
        harness.step();

        assert_eq!(composed(&mut ctx), None);
    }
}
