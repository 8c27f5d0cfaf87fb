use eframe::egui;
use egui::{Color32, Pos2, Rect, Sense, Vec2};
use pdf_view::constants::{PAGE_BACKGROUND, SHADOW_OFFSET};
use pdf_view::{ComposedFrame, ViewportController};

/// Shadow behind steady pages
const SHADOW_ALPHA: u8 = 110;

/// Size of the remaining panel area in physical pixels
pub fn viewport_pixels(ui: &egui::Ui) -> (u32, u32) {
    let size = ui.available_size() * ui.ctx().pixels_per_point();
    (size.x.max(1.0) as u32, size.y.max(1.0) as u32)
}

pub fn show_canvas(
    ui: &mut egui::Ui,
    controller: &ViewportController,
    texture: Option<&egui::TextureHandle>,
) {
    match (controller.frame(), texture) {
        (Some(frame), Some(texture)) => show_frame(ui, frame, texture),
        _ => show_empty_state(ui, controller.has_document()),
    }
}

fn show_frame(ui: &mut egui::Ui, frame: &ComposedFrame, texture: &egui::TextureHandle) {
    let pixels_per_point = ui.ctx().pixels_per_point();
    let points = |px: f32| px / pixels_per_point;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (region_w, region_h) = frame.scroll_region;
            let (region, _) = ui.allocate_exact_size(
                Vec2::new(points(region_w as f32), points(region_h as f32)),
                Sense::hover(),
            );

            let (x, y) = frame.placement();
            let origin = region.min + Vec2::new(points(x as f32), points(y as f32));
            let page = Rect::from_min_size(
                origin,
                Vec2::new(points(frame.width() as f32), points(frame.height() as f32)),
            );

            let painter = ui.painter();
            if !frame.is_flip() {
                let shadow = page.translate(Vec2::splat(points(SHADOW_OFFSET as f32)));
                painter.rect_filled(shadow, 0.0, Color32::from_black_alpha(SHADOW_ALPHA));
                let [r, g, b] = PAGE_BACKGROUND;
                painter.rect_filled(page, 0.0, Color32::from_rgb(r, g, b));
            }
            painter.image(
                texture.id(),
                page,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        });
}

fn show_empty_state(ui: &mut egui::Ui, has_document: bool) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        if has_document {
            ui.label(egui::RichText::new("This document has no pages").color(Color32::GRAY));
        } else {
            ui.heading(egui::RichText::new("PDF Viewer").color(Color32::LIGHT_GRAY));
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("Drop a PDF file here or press Ctrl+O to open one")
                    .color(Color32::GRAY),
            );
        }
    });
}
