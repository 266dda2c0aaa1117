use watermark_core::controller::Stage;

use crate::app::WatermarkApp;

pub fn show(ctx: &egui::Context, app: &mut WatermarkApp) {
    let view = app.controller.view();

    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        ui.horizontal(|ui| {
            if view.loading {
                ui.add(egui::Spinner::new());
                ui.label(format!("{}...", Stage::Processing));
            } else {
                // Same height as the spinner row so the panel doesn't jump.
                ui.add_space(ui.spacing().interact_size.y);
            }
        });

        if let Some(message) = view.error_message() {
            egui::Frame::new()
                .fill(egui::Color32::from_rgb(90, 20, 20))
                .inner_margin(egui::Margin::same(6))
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.colored_label(egui::Color32::from_rgb(255, 200, 200), message);
                });
        }

        ui.horizontal(|ui| {
            match app.controller.selected_file() {
                Some(file) => {
                    ui.label(&file.name);
                    ui.separator();
                    ui.label(format!("{} KiB", file.len().div_ceil(1024)));
                }
                None => {
                    ui.label("No image selected");
                }
            }
            ui.separator();
            ui.label(format!("Server: {}", app.controller.config().base_url));
        });

        ui.add_space(2.0);
    });
}
