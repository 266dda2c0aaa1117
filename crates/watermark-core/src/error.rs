use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatermarkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Not an image file: {media_type}")]
    NotAnImage { media_type: String },

    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid image payload: {0}")]
    InvalidPayload(String),

    /// The server answered with a non-success status. `message` is the
    /// `error` field of the JSON body when present.
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("Save failed: {0}")]
    Save(String),

    #[error("Background worker stopped")]
    WorkerStopped,
}

pub type Result<T> = std::result::Result<T, WatermarkError>;
