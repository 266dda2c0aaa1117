use watermark_core::controller::{Control, UiEvent};

use crate::app::WatermarkApp;

pub fn show(ctx: &egui::Context, app: &mut WatermarkApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let scroll_to_result = app.controller.take_scroll_request();

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Original");
            match &app.textures.original {
                Some(texture) => show_texture(ui, texture),
                None => placeholder(ui, "No image selected"),
            }

            if !app.controller.view().result_visible() {
                return;
            }

            ui.add_space(12.0);
            ui.separator();
            let heading = ui.heading("Watermarked");
            if scroll_to_result {
                heading.scroll_to_me(Some(egui::Align::TOP));
            }
            match &app.textures.result {
                Some(texture) => show_texture(ui, texture),
                None => placeholder(ui, "No preview available"),
            }

            ui.add_space(6.0);
            let enabled = app.controller.view().download_enabled;
            if ui.add_enabled(enabled, egui::Button::new("Download")).clicked() {
                app.dispatch(UiEvent::click(Control::DownloadButton));
            }
        });
    });
}

fn show_texture(ui: &mut egui::Ui, texture: &egui::TextureHandle) {
    let size = texture.size_vec2();
    let scale = (ui.available_width() / size.x).min(1.0);
    ui.add(egui::Image::new((texture.id(), size * scale)));
}

fn placeholder(ui: &mut egui::Ui, text: &str) {
    ui.add_space(20.0);
    ui.vertical_centered(|ui| {
        ui.weak(text);
    });
}
