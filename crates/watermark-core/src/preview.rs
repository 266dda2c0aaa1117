use std::fmt;

use crate::error::Result;

/// Decoded RGBA8 pixels ready to upload as a texture.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl PreviewImage {
    /// Decode any format the `image` crate recognises from its magic bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

impl fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PreviewImage({}x{})", self.width, self.height)
    }
}
