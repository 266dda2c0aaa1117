use watermark_core::controller::{Command, Outcome};
use watermark_core::file::SelectedFile;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode, process or download; see [`Command`].
    Run(Command),
}

/// Results sent back to the UI thread, from the worker or from dialog threads.
pub enum WorkerResult {
    /// A command finished.
    Outcome(Outcome),

    /// The file picker returned a file.
    FilePicked(SelectedFile),

    /// Writing a saved download failed after the dialog closed.
    SaveFailed { message: String },

    Error { message: String },
}
