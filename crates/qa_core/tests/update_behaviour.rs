use std::sync::Once;

use pretty_assertions::assert_eq;
use qa_core::{
    update, AppState, Effect, ExportKind, Msg, QaRecord, RequestState, RequestStatus,
    UploadCandidate,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn pdf(name: &str) -> UploadCandidate {
    UploadCandidate::new(name, "application/pdf", b"%PDF-1.4\n".to_vec())
}

fn submit(state: AppState, candidate: UploadCandidate) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::FileSelected(Some(candidate)));
    update(state, Msg::SubmitClicked)
}

fn submitted_id(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitAnalysis { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("submit effect")
}

#[test]
fn text_file_is_rejected_without_network_effect() {
    init_logging();
    let candidate = UploadCandidate::new("x.txt", "text/plain", Vec::new());

    let (next, effects) = update(AppState::new(), Msg::SubmitFile(Some(candidate)));

    assert!(effects.is_empty());
    assert_eq!(
        next.request_state(),
        &RequestState::Failed("Please select a PDF file".to_string())
    );
}

#[test]
fn submit_without_selection_fails() {
    init_logging();
    let (next, effects) = update(AppState::new(), Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(next.view().error.as_deref(), Some("Please select a PDF file"));
}

#[test]
fn selecting_non_pdf_clears_selection_and_reports() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FileSelected(Some(pdf("a.pdf"))));
    assert_eq!(state.view().file_name.as_deref(), Some("a.pdf"));

    let text = UploadCandidate::new("notes.txt", "text/plain", b"hi".to_vec());
    let (state, effects) = update(state, Msg::FileSelected(Some(text)));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.file_name, None);
    assert!(!view.can_submit);
    assert_eq!(view.status, RequestStatus::Failed);
}

#[test]
fn selecting_valid_file_after_failure_clears_error() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FileSelected(None));
    assert_eq!(state.view().status, RequestStatus::Failed);

    let (state, _) = update(state, Msg::FileSelected(Some(pdf("ok.pdf"))));
    assert_eq!(state.request_state(), &RequestState::Idle);
    assert!(state.view().can_submit);
}

#[test]
fn valid_submit_emits_exactly_one_request() {
    init_logging();
    let candidate = pdf("paper.pdf");
    let (mut next, effects) = submit(AppState::new(), candidate.clone());

    assert_eq!(
        effects,
        vec![Effect::SubmitAnalysis {
            request_id: 1,
            candidate,
        }]
    );
    assert_eq!(
        next.request_state(),
        &RequestState::Submitting { request_id: 1 }
    );
    let view = next.view();
    assert!(view.is_loading);
    assert!(!view.can_submit);
    assert!(next.consume_dirty());
}

#[test]
fn submit_while_submitting_is_ignored() {
    init_logging();
    let (mut state, _) = submit(AppState::new(), pdf("a.pdf"));
    assert!(state.consume_dirty());
    let before = state.clone();

    let (mut next, effects) = update(state, Msg::SubmitFile(Some(pdf("b.pdf"))));
    assert!(effects.is_empty());
    assert_eq!(next, before);
    assert!(!next.consume_dirty());

    let (next, effects) = update(next, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(next.request_state(), &RequestState::Submitting { request_id: 1 });
}

#[test]
fn success_publishes_results_in_server_order() {
    init_logging();
    let (state, effects) = submit(AppState::new(), pdf("a.pdf"));
    let request_id = submitted_id(&effects);
    let records = vec![
        QaRecord::free_text("Q1?", "A1"),
        QaRecord::multiple_choice("Q2?", [("A", "x"), ("B", "y")], "B"),
    ];

    let (state, effects) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id,
            records: records.clone(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.results().to_vec(), records);
    match state.request_state() {
        RequestState::Succeeded(snapshot) => assert_eq!(snapshot.to_vec(), records),
        other => panic!("unexpected state {other:?}"),
    }
    let view = state.view();
    assert_eq!(view.result_count, 2);
    assert_eq!(view.results[1].number, 2);
    assert_eq!(view.file_name, None);
}

#[test]
fn failure_surfaces_message() {
    init_logging();
    let (state, effects) = submit(AppState::new(), pdf("a.pdf"));
    let request_id = submitted_id(&effects);

    let (state, _) = update(
        state,
        Msg::AnalysisFailed {
            request_id,
            message: "bad pdf".to_string(),
        },
    );

    assert_eq!(
        state.request_state(),
        &RequestState::Failed("bad pdf".to_string())
    );
    assert!(!state.view().is_loading);
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, _) = submit(AppState::new(), pdf("a.pdf"));

    let (state, _) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id: 41,
            records: vec![QaRecord::free_text("Q?", "A")],
        },
    );

    assert_eq!(state.request_state(), &RequestState::Submitting { request_id: 1 });
    assert!(state.results().is_empty());
}

#[test]
fn resubmission_clears_previous_results() {
    init_logging();
    let (state, effects) = submit(AppState::new(), pdf("a.pdf"));
    let (state, _) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id: submitted_id(&effects),
            records: vec![QaRecord::free_text("Q?", "A")],
        },
    );
    assert_eq!(state.results().len(), 1);

    let (state, effects) = submit(state, pdf("b.pdf"));

    assert_eq!(submitted_id(&effects), 2);
    assert!(state.results().is_empty());
}

#[test]
fn empty_result_set_is_a_success() {
    init_logging();
    let (state, effects) = submit(AppState::new(), pdf("a.pdf"));
    let (state, _) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id: submitted_id(&effects),
            records: Vec::new(),
        },
    );

    assert_eq!(state.view().status, RequestStatus::Succeeded);
    assert_eq!(state.view().error, None);
}

#[test]
fn exports_carry_the_displayed_snapshot() {
    init_logging();
    let (state, effects) = submit(AppState::new(), pdf("a.pdf"));
    let (state, _) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id: submitted_id(&effects),
            records: vec![QaRecord::free_text("Q1?", "A1")],
        },
    );

    let (state, effects) = update(state, Msg::ExportDocumentClicked);
    match effects.as_slice() {
        [Effect::ExportDocument { snapshot }] => {
            assert!(std::sync::Arc::ptr_eq(snapshot, &state.results()))
        }
        other => panic!("unexpected effects {other:?}"),
    }

    let (_state, effects) = update(state, Msg::ExportSnapshotClicked);
    assert!(matches!(effects.as_slice(), [Effect::ExportSnapshot { .. }]));
}

#[test]
fn export_is_ignored_while_submitting() {
    init_logging();
    let (state, _) = submit(AppState::new(), pdf("a.pdf"));

    let (state, effects) = update(state, Msg::ExportDocumentClicked);
    assert!(effects.is_empty());
    let (_state, effects) = update(state, Msg::ExportSnapshotClicked);
    assert!(effects.is_empty());
}

#[test]
fn export_completion_is_recorded_without_touching_request() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::ExportCompleted {
            kind: ExportKind::Snapshot,
            result: Err("disk full".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(state.request_state(), &RequestState::Idle);
    let export = view.last_export.expect("export status");
    assert_eq!(export.kind, ExportKind::Snapshot);
    assert_eq!(export.result, Err("disk full".to_string()));
}

#[test]
fn toggling_rows_expands_one_at_a_time() {
    init_logging();
    let (state, effects) = submit(AppState::new(), pdf("a.pdf"));
    let (state, _) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id: submitted_id(&effects),
            records: vec![
                QaRecord::free_text("Q1?", "A1"),
                QaRecord::free_text("Q2?", "A2"),
            ],
        },
    );

    let (state, _) = update(state, Msg::ResultToggled { index: 0 });
    let (state, _) = update(state, Msg::ResultToggled { index: 1 });
    let expanded: Vec<_> = state.view().results.iter().map(|r| r.expanded).collect();
    assert_eq!(expanded, vec![false, true]);

    let (mut state, _) = update(state, Msg::ResultToggled { index: 1 });
    assert!(state.view().results.iter().all(|r| !r.expanded));
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::ResultToggled { index: 9 });
    assert!(!state.consume_dirty());
}
