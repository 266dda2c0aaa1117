use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WatermarkError};

/// A processed image as returned by the server, normally a
/// `data:<type>;base64,<data>` URI.
///
/// The string is kept verbatim because the download endpoint expects it back
/// unchanged. Only [`decode`](Self::decode) cares about its shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessedImagePayload(String);

impl ProcessedImagePayload {
    /// Accept any non-empty embeddable image string.
    pub fn parse(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        if uri.trim().is_empty() {
            return Err(WatermarkError::InvalidPayload("reply has no image".into()));
        }
        Ok(Self(uri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media type of a data URI payload, empty for anything else.
    pub fn media_type(&self) -> &str {
        split_data_uri(&self.0).map(|(mt, _)| mt).unwrap_or_default()
    }

    /// Decode the embedded bytes. Fails for anything but a base64 data URI.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let (_, data) = split_data_uri(&self.0)?;
        general_purpose::STANDARD
            .decode(data)
            .map_err(|e| WatermarkError::InvalidPayload(format!("bad base64: {e}")))
    }
}

fn split_data_uri(uri: &str) -> Result<(&str, &str)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| WatermarkError::InvalidPayload("missing data: prefix".into()))?;
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| WatermarkError::InvalidPayload("missing data separator".into()))?;
    let media_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| WatermarkError::InvalidPayload("payload is not base64 encoded".into()))?;
    Ok((media_type, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_decode() {
        let p = ProcessedImagePayload::parse("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(p.media_type(), "image/jpeg");
        assert_eq!(p.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_parse_keeps_any_non_empty_string() {
        let p = ProcessedImagePayload::parse("data:...").unwrap();
        assert_eq!(p.as_str(), "data:...");
        assert_eq!(p.media_type(), "");
        assert!(p.decode().is_err());

        let p = ProcessedImagePayload::parse("data:image/svg+xml,%3Csvg%2F%3E").unwrap();
        assert!(p.decode().is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(ProcessedImagePayload::parse("").is_err());
        assert!(ProcessedImagePayload::parse("  ").is_err());
    }
}
