use watermark_core::preview::PreviewImage;

/// Convert a decoded preview to an egui ColorImage.
pub fn preview_to_color_image(preview: &PreviewImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(preview.size(), &preview.rgba)
}
