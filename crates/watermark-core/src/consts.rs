/// Default server address (the Flask development bind).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Path of the multipart processing endpoint.
pub const PROCESS_PATH: &str = "/process";

/// Path of the JSON download endpoint.
pub const DOWNLOAD_PATH: &str = "/download";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How long a transient error stays on screen, in seconds.
pub const DEFAULT_ERROR_DISPLAY_SECS: u64 = 5;

/// Largest upload the server accepts (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Default watermark opacity (roughly 50%).
pub const DEFAULT_OPACITY: u8 = 128;

/// Default watermark color (white).
pub const DEFAULT_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// Maximum number of characters kept in the download filename slug.
pub const SLUG_MAX_LEN: usize = 20;

/// Slug used when the watermark text has no usable characters.
pub const SLUG_FALLBACK: &str = "image";

/// Message shown when the processing endpoint fails without an error body.
pub const PROCESS_FAILED_MESSAGE: &str = "Processing failed";

/// Prefix for every download error shown to the user.
pub const DOWNLOAD_FAILED_PREFIX: &str = "Download failed: ";

/// Message shown when a non-image file is dropped or picked.
pub const NOT_AN_IMAGE_MESSAGE: &str = "Please select an image file.";

/// Media type used when a file's type cannot be determined.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// File extensions offered by file pickers (the formats the server accepts).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff"];
