mod app;
mod convert;
mod messages;
mod panels;
mod saver;
mod worker;

use std::path::Path;

use watermark_core::config::ClientConfig;

/// Config file picked up from the working directory when present.
const CONFIG_FILE: &str = "watermark.toml";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config(Path::new(CONFIG_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0])
            .with_title("Watermark")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Watermark",
        options,
        Box::new(move |cc| Ok(Box::new(app::WatermarkApp::new(&cc.egui_ctx, config)?))),
    )
}

fn load_config(path: &Path) -> ClientConfig {
    if !path.exists() {
        return ClientConfig::default();
    }
    match ClientConfig::load(path) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring {}: {e}", path.display());
            ClientConfig::default()
        }
    }
}
