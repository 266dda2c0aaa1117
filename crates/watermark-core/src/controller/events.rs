use std::collections::HashMap;

use crate::file::SelectedFile;
use crate::params::{HexColor, Opacity};

/// The interactive elements of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    DropZone,
    FilePicker,
    WatermarkText,
    OpacitySlider,
    ColorInput,
    ProcessButton,
    DownloadButton,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    DragOver,
    DragLeave,
    Drop,
    Change,
    Input,
}

/// Value carried by an event, if any.
#[derive(Clone, Debug)]
pub enum EventPayload {
    None,
    File(SelectedFile),
    Text(String),
    Opacity(Opacity),
    Color(HexColor),
}

/// A user action as reported by a front end.
#[derive(Clone, Debug)]
pub struct UiEvent {
    pub control: Control,
    pub kind: EventKind,
    pub payload: EventPayload,
}

impl UiEvent {
    pub fn new(control: Control, kind: EventKind, payload: EventPayload) -> Self {
        Self {
            control,
            kind,
            payload,
        }
    }

    pub fn click(control: Control) -> Self {
        Self::new(control, EventKind::Click, EventPayload::None)
    }

    pub fn drag_over() -> Self {
        Self::new(Control::DropZone, EventKind::DragOver, EventPayload::None)
    }

    pub fn drag_leave() -> Self {
        Self::new(Control::DropZone, EventKind::DragLeave, EventPayload::None)
    }

    pub fn drop_file(file: SelectedFile) -> Self {
        Self::new(Control::DropZone, EventKind::Drop, EventPayload::File(file))
    }

    pub fn pick_file(file: SelectedFile) -> Self {
        Self::new(Control::FilePicker, EventKind::Change, EventPayload::File(file))
    }

    pub fn text_input(text: impl Into<String>) -> Self {
        Self::new(
            Control::WatermarkText,
            EventKind::Input,
            EventPayload::Text(text.into()),
        )
    }

    pub fn opacity_input(opacity: Opacity) -> Self {
        Self::new(
            Control::OpacitySlider,
            EventKind::Input,
            EventPayload::Opacity(opacity),
        )
    }

    pub fn color_input(color: HexColor) -> Self {
        Self::new(Control::ColorInput, EventKind::Input, EventPayload::Color(color))
    }
}

/// What the controller does in response to an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handler {
    OpenFilePicker,
    DragOver,
    DragLeave,
    AcceptFile,
    UpdateText,
    UpdateOpacity,
    UpdateColor,
    Process,
    Download,
}

/// Subscription table mapping `(control, event)` to a handler.
#[derive(Clone, Debug)]
pub struct EventTable {
    routes: HashMap<(Control, EventKind), Handler>,
}

impl EventTable {
    pub fn empty() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// The form's wiring: drop zone, file picker, three inputs, two buttons.
    pub fn standard() -> Self {
        Self::empty()
            .route(Control::DropZone, EventKind::Click, Handler::OpenFilePicker)
            .route(Control::DropZone, EventKind::DragOver, Handler::DragOver)
            .route(Control::DropZone, EventKind::DragLeave, Handler::DragLeave)
            .route(Control::DropZone, EventKind::Drop, Handler::AcceptFile)
            .route(Control::FilePicker, EventKind::Change, Handler::AcceptFile)
            .route(Control::WatermarkText, EventKind::Input, Handler::UpdateText)
            .route(Control::OpacitySlider, EventKind::Input, Handler::UpdateOpacity)
            .route(Control::ColorInput, EventKind::Input, Handler::UpdateColor)
            .route(Control::ProcessButton, EventKind::Click, Handler::Process)
            .route(Control::DownloadButton, EventKind::Click, Handler::Download)
    }

    pub fn route(mut self, control: Control, kind: EventKind, handler: Handler) -> Self {
        self.routes.insert((control, kind), handler);
        self
    }

    pub fn lookup(&self, control: Control, kind: EventKind) -> Option<Handler> {
        self.routes.get(&(control, kind)).copied()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for EventTable {
    fn default() -> Self {
        Self::standard()
    }
}
