use std::fmt;
use std::time::Instant;

use tracing::debug;

use crate::client::ProcessingService;
use crate::error::{Result, WatermarkError};
use crate::file::SelectedFile;
use crate::params::WatermarkParameters;
use crate::payload::ProcessedImagePayload;
use crate::preview::PreviewImage;

/// Work the controller hands to an executor.
///
/// `generation` identifies the file intake the command belongs to, so late
/// outcomes for a replaced file can be recognised.
#[derive(Clone, Debug)]
pub enum Command {
    /// Decode the selected file for the local preview (no network).
    DecodePreview { generation: u64, file: SelectedFile },

    /// Upload the file and parameters to the processing endpoint.
    Process {
        generation: u64,
        file: SelectedFile,
        params: WatermarkParameters,
    },

    /// Fetch the final file for the held payload.
    Download { payload: ProcessedImagePayload },
}

impl Command {
    pub fn stage(&self) -> Stage {
        match self {
            Self::DecodePreview { .. } => Stage::Preview,
            Self::Process { .. } => Stage::Processing,
            Self::Download { .. } => Stage::Downloading,
        }
    }

    /// The outcome of this command when it could not be run at all.
    pub fn fail(self, error: WatermarkError) -> Outcome {
        match self {
            Self::DecodePreview { generation, .. } => Outcome::PreviewDecoded {
                generation,
                result: Err(error),
            },
            Self::Process { generation, .. } => Outcome::Processed {
                generation,
                result: Err(error),
            },
            Self::Download { .. } => Outcome::Downloaded { result: Err(error) },
        }
    }
}

/// A successful processing round-trip: the payload plus its preview.
///
/// The payload is usable for download even when it cannot be decoded locally.
#[derive(Debug)]
pub struct ProcessedResult {
    pub payload: ProcessedImagePayload,
    pub preview: Result<PreviewImage>,
}

/// Completion of a [`Command`], fed back to `Controller::apply`.
#[derive(Debug)]
pub enum Outcome {
    PreviewDecoded {
        generation: u64,
        result: Result<PreviewImage>,
    },
    Processed {
        generation: u64,
        result: Result<ProcessedResult>,
    },
    Downloaded {
        result: Result<Vec<u8>>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Preview,
    Processing,
    Downloading,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preview => write!(f, "Loading preview"),
            Self::Processing => write!(f, "Processing"),
            Self::Downloading => write!(f, "Downloading"),
        }
    }
}

/// Run a command to completion on the calling thread.
pub fn execute(service: &dyn ProcessingService, command: Command) -> Outcome {
    let stage = command.stage();
    let start = Instant::now();

    let outcome = match command {
        Command::DecodePreview { generation, file } => Outcome::PreviewDecoded {
            generation,
            result: PreviewImage::decode(&file.bytes),
        },
        Command::Process {
            generation,
            file,
            params,
        } => Outcome::Processed {
            generation,
            result: service.process(&file, &params).map(|payload| {
                let preview = payload.decode().and_then(|bytes| PreviewImage::decode(&bytes));
                ProcessedResult { payload, preview }
            }),
        },
        Command::Download { payload } => Outcome::Downloaded {
            result: service.download(&payload),
        },
    };

    debug!("{stage} finished in {:?}", start.elapsed());
    outcome
}
