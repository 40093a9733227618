use std::sync::mpsc;

use crate::{update, AppState, AppViewModel, Effect, Msg, RequestState, ResultSet, UploadCandidate};

/// Owns the application state and publishes a fresh view on every change.
///
/// Messages are applied one at a time; each transition runs to completion
/// before the next message is looked at. Effects are returned to the caller,
/// which is responsible for executing them and feeding results back in.
#[derive(Default)]
pub struct Controller {
    state: AppState,
    subscribers: Vec<mpsc::Sender<AppViewModel>>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a renderer. The current view is delivered immediately.
    pub fn subscribe(&mut self) -> mpsc::Receiver<AppViewModel> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(self.state.view());
        self.subscribers.push(tx);
        rx
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        if state.consume_dirty() {
            self.publish(view);
        }
        self.state = state;
        effects
    }

    pub fn submit(&mut self, candidate: Option<UploadCandidate>) -> Vec<Effect> {
        self.dispatch(Msg::SubmitFile(candidate))
    }

    pub fn request_state(&self) -> &RequestState {
        self.state.request_state()
    }

    pub fn results(&self) -> ResultSet {
        self.state.results()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    fn publish(&mut self, view: AppViewModel) {
        // Drop renderers that went away.
        self.subscribers.retain(|tx| tx.send(view.clone()).is_ok());
    }
}
