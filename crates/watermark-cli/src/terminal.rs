use std::path::{Path, PathBuf};
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use watermark_core::controller::{ObjectHandle, SaveTarget, Stage, ViewState};
use watermark_core::error::Result;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

/// Loading indicator for one network round-trip.
pub fn spinner(stage: Stage) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} ({elapsed})")?);
    pb.set_message(stage.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Writes downloads into a directory, remembering the last path written.
pub struct DiskSaver {
    dir: PathBuf,
    pub saved: Option<PathBuf>,
}

impl DiskSaver {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            saved: None,
        }
    }
}

impl SaveTarget for DiskSaver {
    fn save(&mut self, filename: &str, object: ObjectHandle) -> Result<()> {
        let path = self.dir.join(filename);
        std::fs::write(&path, object.bytes())?;
        tracing::debug!("wrote {} ({} bytes)", path.display(), object.bytes().len());
        self.saved = Some(path);
        Ok(())
    }
}

pub fn print_form(view: &ViewState, file: &str, text: &str, server: &str) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Watermark"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(9)));
    println!();
    println!("  {:<10}{}", s.label.apply_to("Image"), s.path.apply_to(file));
    println!("  {:<10}{}", s.label.apply_to("Text"), s.value.apply_to(text));
    println!(
        "  {:<10}{}",
        s.label.apply_to("Opacity"),
        s.value.apply_to(&view.opacity_label)
    );
    println!(
        "  {:<10}{}",
        s.label.apply_to("Color"),
        s.value.apply_to(&view.color_label)
    );
    println!("  {:<10}{}", s.label.apply_to("Server"), s.path.apply_to(server));
    println!();
}
