use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;
use watermark_core::client::{HttpClient, ProcessingService};
use watermark_core::config::ClientConfig;
use watermark_core::controller::{execute, Control, Controller, Effect, UiEvent};
use watermark_core::file::SelectedFile;
use watermark_core::params::{HexColor, Opacity};

use crate::terminal::{self, DiskSaver};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input image file
    pub image: PathBuf,

    /// Watermark text
    pub text: String,

    /// Watermark opacity (0 = invisible, 255 = opaque)
    #[arg(long)]
    pub opacity: Option<u8>,

    /// Watermark color as hex (e.g. "#FF0000")
    #[arg(long)]
    pub color: Option<HexColor>,

    /// Server base URL
    #[arg(long)]
    pub server: Option<String>,

    /// Client config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to save into (default: next to the input image)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

pub fn run(args: &ProcessArgs) -> Result<()> {
    let config = load_config(args)?;
    let service = HttpClient::new(&config).context("Failed to build HTTP client")?;
    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        args.image
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    });
    let mut saver = DiskSaver::new(&output_dir);
    let mut controller = Controller::new(config);

    // Fill the form the way a user would, then press the buttons.
    let file = SelectedFile::from_path(&args.image)
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    let mut events = vec![UiEvent::text_input(args.text.as_str())];
    if let Some(opacity) = args.opacity {
        events.push(UiEvent::opacity_input(Opacity(opacity)));
    }
    if let Some(color) = args.color {
        events.push(UiEvent::color_input(color));
    }
    events.push(UiEvent::pick_file(file));
    for event in events {
        dispatch(&mut controller, &service, &mut saver, event)?;
    }

    terminal::print_form(
        controller.view(),
        &args.image.display().to_string(),
        controller.text().trim(),
        service.base_url(),
    );

    if !controller.view().process_enabled {
        bail!("Nothing to process: watermark text is empty");
    }
    run_event(
        &mut controller,
        &service,
        &mut saver,
        UiEvent::click(Control::ProcessButton),
    )?;
    if controller.processed_payload().is_none() {
        bail!(
            "{}",
            controller.view().error_message().unwrap_or("Processing failed")
        );
    }
    match &controller.view().result_preview {
        Some(preview) => {
            println!("  Processed {}x{} preview received", preview.width, preview.height)
        }
        None => tracing::warn!(
            "{}",
            controller.view().error_message().unwrap_or("result has no preview")
        ),
    }
    // A missing preview doesn't stop the download.
    controller.hide_error();

    dispatch(
        &mut controller,
        &service,
        &mut saver,
        UiEvent::click(Control::DownloadButton),
    )?;

    match saver.saved {
        Some(path) => println!("\nSaved to {}", path.display()),
        None => bail!("Download produced no file"),
    }
    Ok(())
}

fn load_config(args: &ProcessArgs) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(ref server) = args.server {
        config.base_url = server.clone();
    }
    Ok(config)
}

/// Dispatch one event and run whatever it triggers to completion.
/// Fails if the controller ends up showing an error.
fn dispatch(
    controller: &mut Controller,
    service: &dyn ProcessingService,
    saver: &mut DiskSaver,
    event: UiEvent,
) -> Result<()> {
    run_event(controller, service, saver, event)?;
    if let Some(message) = controller.view().error_message() {
        bail!("{message}");
    }
    Ok(())
}

fn run_event(
    controller: &mut Controller,
    service: &dyn ProcessingService,
    saver: &mut DiskSaver,
    event: UiEvent,
) -> Result<()> {
    match controller.dispatch(event, Instant::now()) {
        Some(Effect::Run(command)) => {
            let pb = terminal::spinner(command.stage())?;
            let outcome = execute(service, command);
            pb.finish_and_clear();
            controller.apply(outcome, saver, Instant::now());
        }
        Some(Effect::OpenFilePicker) | None => {}
    }
    Ok(())
}
