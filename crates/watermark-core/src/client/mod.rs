mod http;

pub use http::HttpClient;

use crate::error::Result;
use crate::file::SelectedFile;
use crate::params::WatermarkParameters;
use crate::payload::ProcessedImagePayload;

/// The remote side of the workflow.
///
/// Implemented over HTTP by [`HttpClient`]; front ends and tests may supply
/// their own.
pub trait ProcessingService: Send + Sync {
    /// Upload the image with its parameters and return the rendered preview.
    fn process(
        &self,
        file: &SelectedFile,
        params: &WatermarkParameters,
    ) -> Result<ProcessedImagePayload>;

    /// Exchange a processed payload for the final file bytes.
    fn download(&self, payload: &ProcessedImagePayload) -> Result<Vec<u8>>;
}
