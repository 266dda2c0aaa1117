use std::time::{Duration, Instant};

use crate::params::{HexColor, Opacity};
use crate::preview::PreviewImage;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropZoneState {
    #[default]
    Empty,
    /// A drag is hovering over the zone.
    DragOver,
    HasFile,
}

/// A transient error message with its expiry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    pub expires_at: Instant,
}

impl ErrorBanner {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

/// Everything a front end needs to draw the form. Owned and updated by the
/// controller; front ends only read it.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub drop_zone: DropZoneState,
    /// Drop-zone state to return to when a drag leaves.
    pub(crate) drop_zone_rest: DropZoneState,
    pub process_enabled: bool,
    pub download_enabled: bool,
    pub loading: bool,
    pub error: Option<ErrorBanner>,
    pub original_preview: Option<PreviewImage>,
    /// Decoded result, absent when the payload can't be decoded locally.
    pub result_preview: Option<PreviewImage>,
    /// A processed payload is held and the result panel is open.
    pub result_shown: bool,
    pub opacity_label: String,
    pub color_label: String,
    /// Set when a new result is shown; cleared by `Controller::take_scroll_request`.
    pub scroll_to_result: bool,
    /// Bumped whenever either preview changes.
    pub preview_revision: u64,
}

impl ViewState {
    pub(crate) fn new(opacity: Opacity, color: HexColor) -> Self {
        Self {
            opacity_label: opacity.label(),
            color_label: color.label(),
            ..Default::default()
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn result_visible(&self) -> bool {
        self.result_shown
    }
}
