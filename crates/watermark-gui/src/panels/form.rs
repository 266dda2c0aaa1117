use watermark_core::controller::{Control, DropZoneState, UiEvent};
use watermark_core::params::{HexColor, Opacity};

use crate::app::WatermarkApp;
use crate::panels::section_header;

const DROP_ZONE_HEIGHT: f32 = 90.0;

pub fn show(ctx: &egui::Context, app: &mut WatermarkApp) {
    egui::SidePanel::left("form")
        .resizable(false)
        .exact_width(280.0)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            drop_zone(ui, app);
            ui.add_space(10.0);
            parameters(ui, app);
            ui.add_space(10.0);

            let enabled = app.controller.view().process_enabled;
            let button = egui::Button::new("Process").min_size(egui::vec2(ui.available_width(), 28.0));
            if ui.add_enabled(enabled, button).clicked() {
                app.dispatch(UiEvent::click(Control::ProcessButton));
            }
        });
}

fn drop_zone(ui: &mut egui::Ui, app: &mut WatermarkApp) {
    let state = app.controller.view().drop_zone;
    let (stroke, fill) = match state {
        DropZoneState::DragOver => (
            egui::Stroke::new(2.0, ui.visuals().selection.stroke.color),
            ui.visuals().selection.bg_fill.gamma_multiply(0.3),
        ),
        DropZoneState::HasFile => (
            egui::Stroke::new(1.0, egui::Color32::from_rgb(80, 160, 90)),
            ui.visuals().faint_bg_color,
        ),
        DropZoneState::Empty => (
            ui.visuals().widgets.noninteractive.bg_stroke,
            ui.visuals().faint_bg_color,
        ),
    };

    let caption = match (state, app.controller.selected_file()) {
        (DropZoneState::DragOver, _) => "Release to use this image".to_string(),
        (_, Some(file)) => file.name.clone(),
        (_, None) => "Drop an image here or click to browse".to_string(),
    };

    let response = egui::Frame::new()
        .stroke(stroke)
        .fill(fill)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(ui.available_width(), DROP_ZONE_HEIGHT));
            ui.centered_and_justified(|ui| {
                ui.label(caption);
            });
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    if response.clicked() {
        app.dispatch(UiEvent::click(Control::DropZone));
    }
}

fn parameters(ui: &mut egui::Ui, app: &mut WatermarkApp) {
    section_header(ui, "Watermark text", None);
    let text = ui.add(
        egui::TextEdit::singleline(&mut app.text_input)
            .hint_text("e.g. CONFIDENTIAL")
            .desired_width(f32::INFINITY),
    );
    if text.changed() {
        let value = app.text_input.clone();
        app.dispatch(UiEvent::text_input(value));
    }

    ui.add_space(8.0);
    let opacity_label = app.controller.view().opacity_label.clone();
    section_header(ui, "Opacity", Some(&opacity_label));
    let slider = ui.add(egui::Slider::new(&mut app.opacity_input, 0..=255).show_value(false));
    if slider.changed() {
        app.dispatch(UiEvent::opacity_input(Opacity(app.opacity_input)));
    }

    ui.add_space(8.0);
    let color_label = app.controller.view().color_label.clone();
    section_header(ui, "Color", Some(&color_label));
    let color = ui.color_edit_button_srgb(&mut app.color_input);
    if color.changed() {
        app.dispatch(UiEvent::color_input(HexColor::from_rgb(app.color_input)));
    }
}
