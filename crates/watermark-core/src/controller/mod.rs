//! The upload → process → download workflow.
//!
//! [`Controller`] owns the session state and a [`ViewState`] render model.
//! Front ends translate native input into [`UiEvent`]s and call
//! [`Controller::dispatch`]. Any resulting [`Command`] is run by an executor
//! ([`execute`] inline, or on a worker thread) and its [`Outcome`] is fed back
//! through [`Controller::apply`].

mod events;
mod objects;
mod pipeline;
mod state;

pub use events::{Control, EventKind, EventPayload, EventTable, Handler, UiEvent};
pub use objects::{ObjectHandle, ObjectStore, SaveTarget};
pub use pipeline::{execute, Command, Outcome, ProcessedResult, Stage};
pub use state::{DropZoneState, ErrorBanner, ViewState};

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::consts::{DOWNLOAD_FAILED_PREFIX, NOT_AN_IMAGE_MESSAGE};
use crate::error::WatermarkError;
use crate::file::SelectedFile;
use crate::filename::{download_filename, trim_form_text};
use crate::params::{HexColor, Opacity, WatermarkParameters};
use crate::payload::ProcessedImagePayload;

/// Something the front end has to do on the controller's behalf.
#[derive(Debug)]
pub enum Effect {
    /// Show the platform file picker; its result comes back as a
    /// `FilePicker`/`Change` event.
    OpenFilePicker,
    /// Run the command and feed the outcome to [`Controller::apply`].
    Run(Command),
}

/// Current values of the form inputs.
#[derive(Clone, Debug)]
struct FormState {
    text: String,
    opacity: Opacity,
    color: HexColor,
}

pub struct Controller {
    config: ClientConfig,
    table: EventTable,
    form: FormState,
    selected: Option<SelectedFile>,
    processed: Option<ProcessedImagePayload>,
    /// Bumped on every accepted file.
    generation: u64,
    /// A processing call is in flight.
    busy: bool,
    downloading: bool,
    objects: ObjectStore,
    view: ViewState,
}

impl Controller {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_table(config, EventTable::standard())
    }

    pub fn with_table(config: ClientConfig, table: EventTable) -> Self {
        let form = FormState {
            text: String::new(),
            opacity: config.default_opacity,
            color: config.default_color,
        };
        let view = ViewState::new(form.opacity, form.color);
        Self {
            config,
            table,
            form,
            selected: None,
            processed: None,
            generation: 0,
            busy: false,
            downloading: false,
            objects: ObjectStore::new(),
            view,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn processed_payload(&self) -> Option<&ProcessedImagePayload> {
        self.processed.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.form.text
    }

    pub fn opacity(&self) -> Opacity {
        self.form.opacity
    }

    pub fn color(&self) -> HexColor {
        self.form.color
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// Parameters as they would be sent right now.
    pub fn params(&self) -> Option<WatermarkParameters> {
        WatermarkParameters::capture(&self.form.text, self.form.opacity, self.form.color)
    }

    /// Returns and clears the pending scroll-to-result request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.view.scroll_to_result)
    }

    // -----------------------------------------------------------------------
    // Event dispatch
    // -----------------------------------------------------------------------

    /// Route a UI event through the subscription table.
    pub fn dispatch(&mut self, event: UiEvent, now: Instant) -> Option<Effect> {
        let Some(handler) = self.table.lookup(event.control, event.kind) else {
            debug!("no handler for {:?}/{:?}", event.control, event.kind);
            return None;
        };

        match (handler, event.payload) {
            (Handler::OpenFilePicker, _) => Some(Effect::OpenFilePicker),
            (Handler::DragOver, _) => {
                self.drag_over();
                None
            }
            (Handler::DragLeave, _) => {
                self.drag_leave();
                None
            }
            (Handler::AcceptFile, EventPayload::File(file)) => {
                self.accept_file(file, now).map(Effect::Run)
            }
            (Handler::UpdateText, EventPayload::Text(text)) => {
                self.set_text(text);
                None
            }
            (Handler::UpdateOpacity, EventPayload::Opacity(opacity)) => {
                self.set_opacity(opacity);
                None
            }
            (Handler::UpdateColor, EventPayload::Color(color)) => {
                self.set_color(color);
                None
            }
            (Handler::Process, _) => self.process().map(Effect::Run),
            (Handler::Download, _) => self.download().map(Effect::Run),
            (handler, payload) => {
                warn!("{handler:?} ignored: unexpected payload {payload:?}");
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // File intake
    // -----------------------------------------------------------------------

    pub fn drag_over(&mut self) {
        if self.view.drop_zone != DropZoneState::DragOver {
            self.view.drop_zone_rest = self.view.drop_zone;
        }
        self.view.drop_zone = DropZoneState::DragOver;
    }

    pub fn drag_leave(&mut self) {
        if self.view.drop_zone == DropZoneState::DragOver {
            self.view.drop_zone = self.view.drop_zone_rest;
        }
    }

    /// Validate and store a file. Returns the preview decode command.
    pub fn accept_file(&mut self, file: SelectedFile, now: Instant) -> Option<Command> {
        self.drag_leave();

        if let Err(e) = file.validate(self.config.max_upload_bytes) {
            info!("rejected {}: {e}", file.name);
            let message = match e {
                WatermarkError::NotAnImage { .. } => NOT_AN_IMAGE_MESSAGE.to_string(),
                other => other.to_string(),
            };
            self.show_error(message, now);
            return None;
        }

        info!("accepted {} ({}, {} bytes)", file.name, file.media_type, file.len());
        self.generation += 1;
        self.selected = Some(file.clone());
        self.processed = None;
        self.view.result_preview = None;
        self.view.result_shown = false;
        self.view.scroll_to_result = false;
        self.view.preview_revision += 1;
        self.hide_error();
        self.refresh_gates();

        Some(Command::DecodePreview {
            generation: self.generation,
            file,
        })
    }

    // -----------------------------------------------------------------------
    // Parameter capture
    // -----------------------------------------------------------------------

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.form.text = text.into();
        self.refresh_gates();
    }

    pub fn set_opacity(&mut self, opacity: Opacity) {
        self.form.opacity = opacity;
        self.view.opacity_label = opacity.label();
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.form.color = color;
        self.view.color_label = color.label();
    }

    // -----------------------------------------------------------------------
    // Remote calls
    // -----------------------------------------------------------------------

    /// Start a processing call. `None` when the gate is closed or a call is
    /// already in flight.
    pub fn process(&mut self) -> Option<Command> {
        if self.busy {
            debug!("process ignored: a call is already in flight");
            return None;
        }
        let file = self.selected.clone()?;
        let params = self.params()?;

        self.busy = true;
        self.view.loading = true;
        self.hide_error();
        self.refresh_gates();

        Some(Command::Process {
            generation: self.generation,
            file,
            params,
        })
    }

    /// Start a download. `None` when nothing has been processed yet.
    pub fn download(&mut self) -> Option<Command> {
        if self.downloading {
            debug!("download ignored: already downloading");
            return None;
        }
        let payload = self.processed.clone()?;
        self.downloading = true;
        self.refresh_gates();
        Some(Command::Download { payload })
    }

    /// Feed a finished command back into the state machine.
    pub fn apply(&mut self, outcome: Outcome, target: &mut dyn SaveTarget, now: Instant) {
        match outcome {
            Outcome::PreviewDecoded { generation, result } => {
                if generation != self.generation {
                    debug!("dropping stale preview (generation {generation})");
                    return;
                }
                match result {
                    Ok(preview) => {
                        self.view.original_preview = Some(preview);
                        self.view.preview_revision += 1;
                        self.view.drop_zone = DropZoneState::HasFile;
                        self.view.drop_zone_rest = DropZoneState::HasFile;
                    }
                    Err(e) => self.show_error(format!("Could not read image: {e}"), now),
                }
            }
            Outcome::Processed { generation, result } => {
                self.busy = false;
                self.view.loading = false;
                if generation != self.generation {
                    debug!("dropping stale processing result (generation {generation})");
                } else {
                    match result {
                        Ok(ProcessedResult { payload, preview }) => {
                            info!("processed image received ({} chars)", payload.as_str().len());
                            self.processed = Some(payload);
                            self.view.result_shown = true;
                            self.view.scroll_to_result = true;
                            self.view.preview_revision += 1;
                            match preview {
                                Ok(preview) => self.view.result_preview = Some(preview),
                                Err(e) => {
                                    warn!("processed image has no local preview: {e}");
                                    self.view.result_preview = None;
                                    self.show_error(format!("Could not display result: {e}"), now);
                                }
                            }
                        }
                        Err(e) => {
                            warn!("processing failed: {e}");
                            self.show_error(e.to_string(), now);
                        }
                    }
                }
                self.refresh_gates();
            }
            Outcome::Downloaded { result } => {
                self.downloading = false;
                self.refresh_gates();
                match result {
                    Ok(bytes) => self.save(bytes, target, now),
                    Err(e) => {
                        warn!("download failed: {e}");
                        self.show_error(format!("{DOWNLOAD_FAILED_PREFIX}{e}"), now);
                    }
                }
            }
        }
    }

    fn save(&mut self, bytes: Vec<u8>, target: &mut dyn SaveTarget, now: Instant) {
        let filename = download_filename(&self.form.text);
        let object = self.objects.create(bytes);
        debug!("saving {} as {filename}", object.url());
        let result = target.save(&filename, object);

        match result {
            Ok(()) => info!("saved {filename}"),
            Err(e) => {
                warn!("save failed: {e}");
                self.show_error(format!("{DOWNLOAD_FAILED_PREFIX}{e}"), now);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Error banner
    // -----------------------------------------------------------------------

    /// Show a transient error, replacing any current one.
    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        self.view.error = Some(ErrorBanner {
            message: message.into(),
            expires_at: now + self.config.error_display(),
        });
    }

    pub fn hide_error(&mut self) {
        self.view.error = None;
    }

    /// Clear the error banner once its time is up.
    pub fn tick(&mut self, now: Instant) {
        if self.view.error.as_ref().is_some_and(|e| e.is_expired(now)) {
            self.view.error = None;
        }
    }

    fn refresh_gates(&mut self) {
        self.view.process_enabled =
            !self.busy && self.selected.is_some() && !trim_form_text(&self.form.text).is_empty();
        self.view.download_enabled = !self.downloading && self.processed.is_some();
    }
}
