use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_error, engine_info};
use qa_core::{ExportKind, RequestId, ResultSet, UploadCandidate};

use crate::client::{AnalysisClient, AnalysisSettings, ReqwestAnalysisClient};
use crate::export::{Clock, DirectorySink, Exporter, LayoutConfig};
use crate::EngineEvent;

/// Header timestamp used until a real clock is configured.
pub const UNKNOWN_GENERATED_AT: &str = "unknown";

/// Everything the engine worker needs to execute effects.
#[derive(Clone)]
pub struct EngineConfig {
    pub analysis: AnalysisSettings,
    pub output_dir: PathBuf,
    pub layout: LayoutConfig,
    /// Timestamp source for the document header.
    pub generated_at: Clock,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            analysis: AnalysisSettings::default(),
            output_dir,
            layout: LayoutConfig::default(),
            generated_at: Arc::new(|| UNKNOWN_GENERATED_AT.to_string()),
        }
    }
}

enum EngineCommand {
    Analyze {
        request_id: RequestId,
        candidate: UploadCandidate,
    },
    Export {
        kind: ExportKind,
        snapshot: ResultSet,
    },
}

/// Handle to the worker thread that runs network requests and exports.
///
/// Commands are queued over a channel; results come back on the event
/// receiver returned by [`EngineHandle::spawn`]. Dropping every handle stops
/// the worker.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(config: EngineConfig) -> (Self, mpsc::Receiver<EngineEvent>) {
        let client = Arc::new(ReqwestAnalysisClient::new(config.analysis.clone()));
        Self::spawn_with_client(config, client)
    }

    pub fn spawn_with_client(
        config: EngineConfig,
        client: Arc<dyn AnalysisClient>,
    ) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let exporter = Exporter::new(
            config.layout,
            config.generated_at,
            Box::new(DirectorySink::new(config.output_dir)),
        );

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Analyze {
                        request_id,
                        candidate,
                    } => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = client.analyze(&candidate).await;
                            let _ = event_tx.send(EngineEvent::AnalysisCompleted {
                                request_id,
                                result,
                            });
                        });
                    }
                    EngineCommand::Export { kind, snapshot } => {
                        let result = run_export(&exporter, kind, &snapshot);
                        let _ = event_tx.send(EngineEvent::ExportCompleted { kind, result });
                    }
                }
            }
            engine_info!("Engine command channel closed; worker exiting");
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn analyze(&self, request_id: RequestId, candidate: UploadCandidate) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze {
            request_id,
            candidate,
        });
    }

    pub fn export(&self, kind: ExportKind, snapshot: ResultSet) {
        let _ = self.cmd_tx.send(EngineCommand::Export { kind, snapshot });
    }
}

fn run_export(
    exporter: &Exporter,
    kind: ExportKind,
    snapshot: &ResultSet,
) -> Result<PathBuf, String> {
    let result = match kind {
        ExportKind::Document => exporter.export_document(snapshot),
        ExportKind::Snapshot => exporter.export_snapshot(snapshot),
    };
    result.map_err(|err| {
        engine_error!("{:?} export failed: {}", kind, err);
        err.to_string()
    })
}
