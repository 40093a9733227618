use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{validate, AppState, Effect, Msg, UploadCandidate, ValidationResult};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(candidate) => {
            // The picker is disabled while a request is in flight.
            if state.request_state().is_submitting() {
                return (state, Vec::new());
            }
            match validate(candidate.as_ref()) {
                ValidationResult::Accepted(candidate) => state.select(candidate),
                ValidationResult::Rejected(reason) => state.reject(reason),
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            let candidate = state.selected().cloned();
            submit(&mut state, candidate)
        }
        Msg::SubmitFile(candidate) => submit(&mut state, candidate),
        Msg::AnalysisSucceeded {
            request_id,
            records,
        } => {
            if state.in_flight() == Some(request_id) {
                engine_info!(
                    "Analysis request {} succeeded with {} records",
                    request_id,
                    records.len()
                );
                state.complete_success(records);
            } else {
                engine_warn!("Ignoring stale analysis result for request {}", request_id);
            }
            Vec::new()
        }
        Msg::AnalysisFailed {
            request_id,
            message,
        } => {
            if state.in_flight() == Some(request_id) {
                engine_info!("Analysis request {} failed: {}", request_id, message);
                state.complete_failure(message);
            } else {
                engine_warn!("Ignoring stale analysis failure for request {}", request_id);
            }
            Vec::new()
        }
        Msg::ExportDocumentClicked => {
            if exportable(&state) {
                vec![Effect::ExportDocument {
                    snapshot: state.results(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ExportSnapshotClicked => {
            if exportable(&state) {
                vec![Effect::ExportSnapshot {
                    snapshot: state.results(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ExportCompleted { kind, result } => {
            state.record_export(kind, result);
            Vec::new()
        }
        Msg::ResultToggled { index } => {
            if !state.toggle_expanded(index) {
                engine_debug!("Toggle for missing result row {}", index);
            }
            Vec::new()
        }
    };

    (state, effects)
}

/// Single gate before any network effect: re-validates even if the caller
/// already did, and refuses to start while another request is in flight.
fn submit(state: &mut AppState, candidate: Option<UploadCandidate>) -> Vec<Effect> {
    if let Some(request_id) = state.in_flight() {
        engine_debug!("Submit ignored; request {} still in flight", request_id);
        return Vec::new();
    }

    match validate(candidate.as_ref()) {
        ValidationResult::Rejected(reason) => {
            state.reject(reason);
            Vec::new()
        }
        ValidationResult::Accepted(candidate) => {
            let request_id = state.begin_submission();
            engine_info!(
                "Submitting {} ({} bytes) as request {}",
                candidate.name(),
                candidate.bytes().len(),
                request_id
            );
            vec![Effect::SubmitAnalysis {
                request_id,
                candidate,
            }]
        }
    }
}

fn exportable(state: &AppState) -> bool {
    if state.request_state().is_submitting() {
        engine_debug!("Export ignored while a request is in flight");
        return false;
    }
    true
}
