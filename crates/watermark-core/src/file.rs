use std::fmt;
use std::path::Path;
use std::sync::Arc;

use image::ImageFormat;

use crate::consts::UNKNOWN_MEDIA_TYPE;
use crate::error::{Result, WatermarkError};

/// An image the user picked or dropped, held in memory.
///
/// The bytes are shared so commands can carry the file to the worker thread
/// without copying it.
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, declaring its media type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(name, media_type_for_path(path), bytes))
    }

    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Intake validation: declared image type and within the upload limit.
    pub fn validate(&self, max_bytes: usize) -> Result<()> {
        if !self.is_image() {
            return Err(WatermarkError::NotAnImage {
                media_type: self.media_type.clone(),
            });
        }
        if self.len() > max_bytes {
            return Err(WatermarkError::FileTooLarge {
                size: self.len(),
                limit: max_bytes,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// Media type implied by a file's extension.
pub fn media_type_for_path(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_MEDIA_TYPE.to_string())
}
