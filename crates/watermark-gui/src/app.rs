use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use watermark_core::client::HttpClient;
use watermark_core::config::ClientConfig;
use watermark_core::consts::{DOWNLOAD_FAILED_PREFIX, SUPPORTED_EXTENSIONS};
use watermark_core::controller::{Controller, Effect, UiEvent};
use watermark_core::error::WatermarkError;
use watermark_core::file::SelectedFile;

use crate::convert::preview_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::saver::DialogSaver;
use crate::worker;

/// Textures for the two previews, rebuilt when the controller's preview
/// revision moves.
#[derive(Default)]
pub struct PreviewTextures {
    pub original: Option<egui::TextureHandle>,
    pub result: Option<egui::TextureHandle>,
    revision: u64,
}

pub struct WatermarkApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub controller: Controller,
    pub textures: PreviewTextures,
    /// Edit buffer behind the text field; the controller holds the committed value.
    pub text_input: String,
    pub opacity_input: u8,
    pub color_input: [u8; 3],
    /// Files were hovering over the window last frame.
    pub hovering: bool,
    pub show_about: bool,
    ctx: egui::Context,
    saver: DialogSaver,
}

impl WatermarkApp {
    pub fn new(ctx: &egui::Context, config: ClientConfig) -> Result<Self> {
        let service = HttpClient::new(&config).context("Failed to build HTTP client")?;
        tracing::info!("Using server {}", service.base_url());

        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(service, result_tx.clone(), ctx.clone());
        let controller = Controller::new(config);

        Ok(Self {
            cmd_tx,
            saver: DialogSaver::new(result_tx.clone(), ctx.clone()),
            result_tx,
            result_rx,
            text_input: String::new(),
            opacity_input: controller.opacity().value(),
            color_input: controller.color().rgb(),
            controller,
            textures: PreviewTextures::default(),
            hovering: false,
            show_about: false,
            ctx: ctx.clone(),
        })
    }

    /// Route a UI event through the controller and carry out its effect.
    pub fn dispatch(&mut self, event: UiEvent) {
        match self.controller.dispatch(event, Instant::now()) {
            Some(Effect::Run(command)) => {
                if let Err(mpsc::SendError(WorkerCommand::Run(command))) =
                    self.cmd_tx.send(WorkerCommand::Run(command))
                {
                    tracing::error!("worker thread is gone, dropping {}", command.stage());
                    let outcome = command.fail(WatermarkError::WorkerStopped);
                    self.controller.apply(outcome, &mut self.saver, Instant::now());
                }
            }
            Some(Effect::OpenFilePicker) => self.open_file_picker(),
            None => {}
        }
    }

    pub fn open_file_picker(&self) {
        let tx = self.result_tx.clone();
        let ctx = self.ctx.clone();
        std::thread::spawn(move || {
            let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", SUPPORTED_EXTENSIONS)
                .add_filter("All files", &["*"])
                .pick_file()
            else {
                return;
            };
            let result = match SelectedFile::from_path(&path) {
                Ok(file) => WorkerResult::FilePicked(file),
                Err(e) => WorkerResult::Error {
                    message: format!("Failed to open {}: {e}", path.display()),
                },
            };
            worker::send(&tx, &ctx, result);
        });
    }

    /// Drain all pending results from the worker and dialog threads.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            let now = Instant::now();
            match result {
                WorkerResult::Outcome(outcome) => {
                    self.controller.apply(outcome, &mut self.saver, now);
                }
                WorkerResult::FilePicked(file) => {
                    self.dispatch(UiEvent::pick_file(file));
                }
                WorkerResult::SaveFailed { message } => {
                    self.controller
                        .show_error(format!("{DOWNLOAD_FAILED_PREFIX}{message}"), now);
                }
                WorkerResult::Error { message } => {
                    self.controller.show_error(message, now);
                }
            }
        }
    }

    /// Translate native drag-and-drop into drop-zone events.
    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.first().cloned(),
            )
        });

        if hovering && !self.hovering {
            self.dispatch(UiEvent::drag_over());
        } else if !hovering && self.hovering && dropped.is_none() {
            self.dispatch(UiEvent::drag_leave());
        }
        self.hovering = hovering;

        let Some(dropped) = dropped else {
            return;
        };
        match dropped_to_selected(&dropped) {
            Ok(file) => self.dispatch(UiEvent::drop_file(file)),
            Err(e) => self
                .controller
                .show_error(format!("Failed to open {}: {e}", dropped.name), Instant::now()),
        }
    }

    fn sync_textures(&mut self, ctx: &egui::Context) {
        let view = self.controller.view();
        if view.preview_revision == self.textures.revision {
            return;
        }
        self.textures.revision = view.preview_revision;
        self.textures.original = view.original_preview.as_ref().map(|p| {
            ctx.load_texture("original", preview_to_color_image(p), egui::TextureOptions::LINEAR)
        });
        self.textures.result = view.result_preview.as_ref().map(|p| {
            ctx.load_texture("result", preview_to_color_image(p), egui::TextureOptions::LINEAR)
        });
    }
}

fn dropped_to_selected(dropped: &egui::DroppedFile) -> watermark_core::error::Result<SelectedFile> {
    if let Some(path) = &dropped.path {
        return SelectedFile::from_path(path);
    }
    // Platforms without paths hand over the bytes directly.
    let bytes = dropped.bytes.as_deref().map(<[u8]>::to_vec).unwrap_or_default();
    let media_type = if dropped.mime.is_empty() {
        watermark_core::file::media_type_for_path(std::path::Path::new(&dropped.name))
    } else {
        dropped.mime.clone()
    };
    Ok(SelectedFile::new(dropped.name.clone(), media_type, bytes))
}

impl eframe::App for WatermarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.handle_file_drops(ctx);

        let now = Instant::now();
        self.controller.tick(now);
        if let Some(banner) = &self.controller.view().error {
            ctx.request_repaint_after(banner.remaining(now));
        }
        self.sync_textures(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::form::show(ctx, self);
        panels::preview::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Watermark")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Watermark");
                        ui.label("Diagonal text watermarks, rendered by the watermark server");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.label(format!("Server: {}", self.controller.config().base_url));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
