use std::sync::mpsc;

use watermark_core::client::ProcessingService;
use watermark_core::controller::execute;

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker<S>(
    service: S,
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand>
where
    S: ProcessingService + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("watermark-worker".into())
        .spawn(move || {
            worker_loop(&service, cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn worker_loop(
    service: &dyn ProcessingService,
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Run(command) => {
                tracing::debug!("worker: {}", command.stage());
                let outcome = execute(service, command);
                send(&tx, &ctx, WorkerResult::Outcome(outcome));
            }
        }
    }
}
