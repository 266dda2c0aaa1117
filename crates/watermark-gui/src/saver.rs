use std::sync::mpsc;

use watermark_core::controller::{ObjectHandle, SaveTarget};
use watermark_core::error::Result;

use crate::messages::WorkerResult;
use crate::worker::send;

/// Asks for a destination with a save dialog and writes the file there.
///
/// The dialog runs on its own thread so the UI keeps drawing. The object
/// moves to that thread and is released once the dialog closes; write errors
/// come back as [`WorkerResult::SaveFailed`].
pub struct DialogSaver {
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
}

impl DialogSaver {
    pub fn new(result_tx: mpsc::Sender<WorkerResult>, ctx: egui::Context) -> Self {
        Self { result_tx, ctx }
    }
}

impl SaveTarget for DialogSaver {
    fn save(&mut self, filename: &str, object: ObjectHandle) -> Result<()> {
        let filename = filename.to_string();
        let tx = self.result_tx.clone();
        let ctx = self.ctx.clone();

        std::thread::spawn(move || {
            let Some(path) = rfd::FileDialog::new()
                .add_filter("JPEG", &["jpg", "jpeg"])
                .set_file_name(&filename)
                .save_file()
            else {
                tracing::info!("save of {filename} cancelled");
                return;
            };
            match std::fs::write(&path, object.bytes()) {
                Ok(()) => tracing::info!("saved {}", path.display()),
                Err(e) => send(
                    &tx,
                    &ctx,
                    WorkerResult::SaveFailed {
                        message: format!("{}: {e}", path.display()),
                    },
                ),
            }
        });

        Ok(())
    }
}
