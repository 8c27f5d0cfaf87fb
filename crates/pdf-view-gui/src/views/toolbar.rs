use eframe::egui;
use pdf_view::ViewportController;

use super::ViewerAction;

pub fn show_toolbar(
    ui: &mut egui::Ui,
    controller: &ViewportController,
    show_log: bool,
) -> Option<ViewerAction> {
    let mut action = None;
    let enabled = controller.page_count() > 0;
    let view = controller.view();

    ui.horizontal(|ui| {
        if ui
            .button("📂 Open")
            .on_hover_text("Open a PDF (Ctrl+O)")
            .clicked()
        {
            action = Some(ViewerAction::Open);
        }

        ui.separator();

        if ui
            .add_enabled(enabled, egui::Button::new("◀"))
            .on_hover_text("Previous page (←)")
            .clicked()
        {
            action = Some(ViewerAction::PreviousPage);
        }
        if ui
            .add_enabled(enabled, egui::Button::new("▶"))
            .on_hover_text("Next page (→)")
            .clicked()
        {
            action = Some(ViewerAction::NextPage);
        }

        let dual_label = if view.dual_page {
            "📄 Single"
        } else {
            "📖 Dual"
        };
        if ui
            .add_enabled(enabled, egui::Button::new(dual_label))
            .on_hover_text("Toggle two-page spreads (D)")
            .clicked()
        {
            action = Some(ViewerAction::ToggleDual);
        }

        ui.separator();

        if ui
            .add_enabled(enabled, egui::Button::new("➖"))
            .on_hover_text("Zoom out (-)")
            .clicked()
        {
            action = Some(ViewerAction::ZoomOut);
        }
        if ui
            .add_enabled(enabled, egui::Button::new("➕"))
            .on_hover_text("Zoom in (+)")
            .clicked()
        {
            action = Some(ViewerAction::ZoomIn);
        }
        if ui
            .add_enabled(enabled, egui::Button::new("Fit").selected(view.fit_mode))
            .on_hover_text("Fit page to window (F)")
            .clicked()
        {
            action = Some(ViewerAction::ToggleFit);
        }

        ui.separator();
        ui.monospace(controller.status());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add(egui::Button::new("📜 Log").selected(show_log))
                .clicked()
            {
                action = Some(ViewerAction::ToggleLog);
            }

            if enabled {
                let mut page = view.page_index + 1;
                let slider = egui::Slider::new(&mut page, 1..=controller.page_count())
                    .show_value(false);
                if ui
                    .add_enabled(!controller.is_flipping(), slider)
                    .changed()
                {
                    action = Some(ViewerAction::JumpTo(page - 1));
                }
            }
        });
    });

    action
}
