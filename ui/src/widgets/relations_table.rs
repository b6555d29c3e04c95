//! Static preview of how the source shows up in the Relations table.

use egui::{Align, Align2, Color32, FontId, Layout, RichText, Sense, Ui, vec2};
use egui_extras::{Column, TableBuilder};
use source_business::{RelationPreview, UtmInput};
use source_states::StateCtx;

use crate::utils::colors::{COLOR_BADGE_FILL, COLOR_BADGE_TEXT, COLOR_BLUE, COLOR_MUTED};

pub const TITLE: &str = "Relations Table Preview";
pub const SUBTITLE: &str = "This is how source will look like in your Relations table";

const HEADER_HEIGHT: f32 = 28.0;
const ROW_HEIGHT: f32 = 48.0;
const AVATAR_RADIUS: f32 = 12.0;

fn status_badge(ui: &mut Ui, status: &str) {
    egui::Frame::new()
        .fill(COLOR_BADGE_FILL)
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(status).small().color(COLOR_BADGE_TEXT));
        });
}

fn initials_avatar(ui: &mut Ui, initials: &str) {
    let (rect, _) = ui.allocate_exact_size(
        vec2(AVATAR_RADIUS * 2.0, AVATAR_RADIUS * 2.0),
        Sense::hover(),
    );
    let painter = ui.painter();
    painter.circle_filled(rect.center(), AVATAR_RADIUS, COLOR_BLUE);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        initials,
        FontId::proportional(10.0),
        Color32::WHITE,
    );
}

pub fn relations_table(state_ctx: &StateCtx, ui: &mut Ui) {
    let row = RelationPreview::sample();
    let source = row.source_label(&state_ctx.state::<UtmInput>().source);

    ui.heading(TITLE);
    ui.label(RichText::new(SUBTITLE).color(COLOR_MUTED));
    ui.add_space(12.0);

    TableBuilder::new(ui)
        .id_salt("relations_preview")
        .striped(false)
        .resizable(false)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::exact(220.0))
        .column(Column::exact(120.0))
        .column(Column::exact(170.0))
        .column(Column::remainder())
        .header(HEADER_HEIGHT, |mut header| {
            for title in RelationPreview::HEADERS {
                header.col(|ui| {
                    ui.label(RichText::new(title).strong().color(COLOR_MUTED));
                });
            }
        })
        .body(|mut body| {
            body.row(ROW_HEIGHT, |mut table_row| {
                table_row.col(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(row.prospect_name).strong());
                        ui.label(RichText::new(row.prospect_email).small().color(COLOR_MUTED));
                    });
                });
                table_row.col(|ui| status_badge(ui, row.status));
                table_row.col(|ui| {
                    initials_avatar(ui, &row.ambassador_initials());
                    ui.label(row.ambassador);
                });
                table_row.col(|ui| {
                    ui.label(format!("🔗 {source}"));
                });
            });
        });
}

#[cfg(test)]
mod relations_table_widget_test {
    use kittest::Queryable;
    use source_business::UtmInput;

    use super::TITLE;
    use crate::test_utils::TestCtx;

    fn table_ctx<'a>() -> TestCtx<'a> {
        TestCtx::new(|ui, state| {
            super::relations_table(&state.ctx, ui);
        })
    }

    #[tokio::test]
    async fn test_renders_sample_row() {
        let mut ctx = table_ctx();
        let harness = ctx.harness_mut();
        harness.step();

        assert!(harness.query_by_label(TITLE).is_some());
        for header in ["Prospect", "Status", "Ambassador", "Source"] {
            assert!(
                harness.query_by_label(header).is_some(),
                "header {header:?} should be rendered"
            );
        }
        assert!(harness.query_by_label("Albus Dumbledore").is_some());
        assert!(harness.query_by_label("In progress").is_some());
        assert!(harness.query_by_label("Joris Renaud").is_some());
    }

    #[tokio::test]
    async fn test_source_column_uses_placeholder_when_empty() {
        let mut ctx = table_ctx();
        let harness = ctx.harness_mut();
        harness.step();

        assert!(harness.query_by_label_contains("newsletter-juin").is_some());
    }

    #[tokio::test]
    async fn test_source_column_mirrors_input() {
        let mut ctx = table_ctx();
        let harness = ctx.harness_mut();
        harness.state_mut().ctx.update::<UtmInput>(|input| {
            input.source = "salon-2024".to_owned();
        });
        harness.step();

        assert!(harness.query_by_label_contains("salon-2024").is_some());
        assert!(harness.query_by_label_contains("newsletter-juin").is_none());
    }
}
