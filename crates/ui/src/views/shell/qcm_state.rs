use std::sync::Arc;

use campus_core::model::{OptionId, QuestionId, Quiz};
use dioxus::prelude::*;
use services::{CompletionDestination, QcmController, SessionError, StartOutcome, TimerTick};
use tokio::sync::Mutex;

use crate::vm::QcmVm;

/// Shared handle to the student's quiz attempt.
///
/// The controller sits behind an async mutex; ticks and clicks queue behind
/// an in-flight submission. `view` is refreshed after
/// every operation and keeps its last value while the controller is busy,
/// so the lockout guard never reads a stale "unlocked" state mid-submit.
#[derive(Clone)]
pub struct QcmState {
    controller: Arc<Mutex<QcmController>>,
    pub view: Signal<Option<QcmVm>>,
    pub busy: Signal<bool>,
    pub error: Signal<Option<String>>,
}

impl QcmState {
    #[must_use]
    pub fn new(
        controller: QcmController,
        view: Signal<Option<QcmVm>>,
        busy: Signal<bool>,
        error: Signal<Option<String>>,
    ) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            view,
            busy,
            error,
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.view.read().as_ref().is_some_and(|vm| vm.locked)
    }

    pub async fn start(&self, quiz: Quiz) {
        let mut controller = self.controller.lock().await;
        match controller.start(quiz) {
            Ok(StartOutcome::Started) => self.set_error(None),
            Ok(StartOutcome::AlreadyActive) => {}
            Err(err) => self.set_error(Some(err.to_string())),
        }
        self.refresh(&controller);
    }

    pub async fn select(&self, question: QuestionId, option: OptionId) {
        let mut controller = self.controller.lock().await;
        if let Err(err) = controller.select_answer(question, option) {
            tracing::debug!(error = %err, "answer ignored");
        }
        self.refresh(&controller);
    }

    pub async fn tick(&self, tick: TimerTick) {
        let mut controller = self.controller.lock().await;
        let expiring = controller
            .session()
            .is_some_and(|session| session.timer_running() && session.remaining_secs() <= 1);
        if expiring {
            self.set_busy(true);
        }
        let result = controller.on_tick(tick).await;
        self.refresh(&controller);
        if expiring {
            self.set_busy(false);
        }
        self.report(result.map(|_| ()));
    }

    pub async fn submit(&self) {
        self.set_busy(true);
        let mut controller = self.controller.lock().await;
        let result = controller.submit().await;
        self.refresh(&controller);
        self.set_busy(false);
        self.report(result.map(|_| ()));
    }

    /// Returns where to go next, or `None` if the attempt cannot be dismissed yet.
    pub async fn dismiss(
        &self,
        destination: CompletionDestination,
    ) -> Option<CompletionDestination> {
        let mut controller = self.controller.lock().await;
        let result = controller.dismiss(destination);
        self.refresh(&controller);
        match result {
            Ok(destination) => {
                self.set_error(None);
                Some(destination)
            }
            Err(err) => {
                tracing::debug!(error = %err, "dismiss refused");
                None
            }
        }
    }

    /// Submission failures already show up in the attempt phase.
    fn report(&self, result: Result<(), SessionError>) {
        match result {
            Ok(()) | Err(SessionError::Submission(_)) => self.set_error(None),
            Err(err) => self.set_error(Some(err.to_string())),
        }
    }

    fn refresh(&self, controller: &QcmController) {
        let mut view = self.view;
        view.set(QcmVm::snapshot(controller));
    }

    fn set_busy(&self, value: bool) {
        let mut busy = self.busy;
        busy.set(value);
    }

    fn set_error(&self, value: Option<String>) {
        let mut error = self.error;
        error.set(value);
    }
}
