use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_info, engine_warn};
use qa_core::{Effect, ExportKind, Msg};
use qa_engine::{AnalysisClient, EngineConfig, EngineEvent, EngineHandle, ReqwestAnalysisClient};

/// Executes effects on the engine and feeds its events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, msg_tx: mpsc::Sender<Msg>) -> Self {
        let client = Arc::new(ReqwestAnalysisClient::new(config.analysis.clone()));
        Self::with_client(config, client, msg_tx)
    }

    pub fn with_client(
        config: EngineConfig,
        client: Arc<dyn AnalysisClient>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let (engine, events) = EngineHandle::spawn_with_client(config, client);
        spawn_event_forwarder(events, msg_tx);
        Self { engine }
    }

    /// Returns how many of `effects` were exports.
    pub fn enqueue(&self, effects: Vec<Effect>) -> usize {
        let mut exports = 0;
        for effect in effects {
            match effect {
                Effect::SubmitAnalysis {
                    request_id,
                    candidate,
                } => {
                    engine_info!(
                        "SubmitAnalysis request_id={} file={} bytes={}",
                        request_id,
                        candidate.name(),
                        candidate.bytes().len()
                    );
                    self.engine.analyze(request_id, candidate);
                }
                Effect::ExportDocument { snapshot } => {
                    self.engine.export(ExportKind::Document, snapshot);
                    exports += 1;
                }
                Effect::ExportSnapshot { snapshot } => {
                    self.engine.export(ExportKind::Snapshot, snapshot);
                    exports += 1;
                }
            }
        }
        exports
    }
}

fn spawn_event_forwarder(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        for event in events {
            if msg_tx.send(event_to_msg(event)).is_err() {
                break;
            }
        }
    });
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnalysisCompleted { request_id, result } => match result {
            Ok(records) => Msg::AnalysisSucceeded {
                request_id,
                records,
            },
            Err(err) => {
                engine_warn!("Request {} failed: {}", request_id, err);
                Msg::AnalysisFailed {
                    request_id,
                    message: err.message,
                }
            }
        },
        EngineEvent::ExportCompleted { kind, result } => Msg::ExportCompleted {
            kind,
            result: result.map(|path| path.display().to_string()),
        },
    }
}
