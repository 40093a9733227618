use std::fs;
use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context, Result};
use engine_logging::{engine_debug, engine_error, engine_info};
use qa_core::{Controller, Msg, RequestState, UploadCandidate};
use qa_engine::EngineConfig;

use crate::effects::EffectRunner;
use crate::render::TerminalRenderer;

/// Exports to run once the analysis succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub export_document: bool,
    pub export_snapshot: bool,
}

impl RunOptions {
    fn export_msgs(self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        if self.export_document {
            msgs.push(Msg::ExportDocumentClicked);
        }
        if self.export_snapshot {
            msgs.push(Msg::ExportSnapshotClicked);
        }
        msgs
    }
}

/// Reads `path` into an upload candidate. The declared type is `content_type`
/// when given, otherwise a guess from the file extension.
pub fn load_candidate(path: &Path, content_type: Option<&str>) -> Result<UploadCandidate> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let declared_type = match content_type {
        Some(content_type) => content_type.to_string(),
        None => mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    };
    engine_debug!("Selected {} as {} ({} bytes)", name, declared_type, bytes.len());
    Ok(UploadCandidate::new(name, declared_type, bytes))
}

/// Selects and submits `candidate`, runs the requested exports and returns
/// once everything has settled. Views are rendered to stdout as they change.
pub fn run(config: EngineConfig, candidate: UploadCandidate, options: RunOptions) -> Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(config, msg_tx);

    let mut controller = Controller::new();
    let views = controller.subscribe();
    let render_thread = thread::spawn(move || {
        let mut renderer = TerminalRenderer::new(io::stdout());
        for view in views {
            if let Err(err) = renderer.render(&view) {
                engine_error!("Failed to render view: {}", err);
                break;
            }
        }
    });

    let outcome = drive(&mut controller, &runner, &msg_rx, candidate, options);

    // Closing the subscription lets the renderer drain and exit.
    drop(controller);
    if render_thread.join().is_err() {
        engine_error!("Render thread panicked");
    }
    outcome
}

fn drive(
    controller: &mut Controller,
    runner: &EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
    candidate: UploadCandidate,
    options: RunOptions,
) -> Result<()> {
    runner.enqueue(controller.dispatch(Msg::FileSelected(Some(candidate))));
    runner.enqueue(controller.dispatch(Msg::SubmitClicked));

    let mut exports_started = false;
    let mut pending_exports = 0usize;
    loop {
        let succeeded_now = match controller.request_state() {
            RequestState::Failed(message) => bail!("{message}"),
            RequestState::Idle => bail!("nothing was submitted"),
            RequestState::Succeeded(records) if !exports_started => {
                engine_info!("Analysis returned {} records", records.len());
                true
            }
            _ => false,
        };
        if succeeded_now {
            exports_started = true;
            for msg in options.export_msgs() {
                pending_exports += runner.enqueue(controller.dispatch(msg));
            }
        }
        if exports_started && pending_exports == 0 {
            return Ok(());
        }

        let msg = msg_rx
            .recv()
            .context("engine stopped before the request finished")?;
        if matches!(msg, Msg::ExportCompleted { .. }) {
            pending_exports = pending_exports.saturating_sub(1);
        }
        runner.enqueue(controller.dispatch(msg));
    }
}
