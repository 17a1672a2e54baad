use super::{
    form::ResetPasswordFormState,
    repository::ResetPasswordRepository,
    submission::{run_submission, SubmissionFailure, SubmissionTiming},
};
use crate::{
    api::ApiClient,
    components::toast::{use_toast, Toaster},
    state::connection::{use_connection, ConnectionState},
};
use futures::future::{abortable, AbortHandle};
use leptos::*;
use std::{cell::RefCell, future::Future, rc::Rc};

pub const NO_CONNECTION_MESSAGE: &str =
    "No connection with the server.\nCheck Internet connection and try again";

/// Host callbacks fired when the form starts or stops submitting.
#[derive(Clone, Copy, Default)]
pub struct SubmittingCallbacks {
    pub on_start: Option<Callback<()>>,
    pub on_end: Option<Callback<()>>,
}

#[derive(Clone)]
pub struct ResetPasswordViewModel {
    pub form: RwSignal<ResetPasswordFormState>,
    pub can_submit: Memo<bool>,
    pub editable: Memo<bool>,
    token: Signal<Option<String>>,
    repository: ResetPasswordRepository,
    toaster: Toaster,
    connection: ConnectionState,
    callbacks: SubmittingCallbacks,
    timing: SubmissionTiming,
    pending: Rc<RefCell<Option<AbortHandle>>>,
}

pub fn use_reset_password_view_model(
    token: Signal<Option<String>>,
    callbacks: SubmittingCallbacks,
) -> ResetPasswordViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = ResetPasswordRepository::new_with_client(Rc::new(api));
    ResetPasswordViewModel::new(
        token,
        repository,
        use_toast(),
        use_connection(),
        callbacks,
        SubmissionTiming::default(),
    )
}

impl ResetPasswordViewModel {
    pub fn new(
        token: Signal<Option<String>>,
        repository: ResetPasswordRepository,
        toaster: Toaster,
        connection: ConnectionState,
        callbacks: SubmittingCallbacks,
        timing: SubmissionTiming,
    ) -> Self {
        let form = create_rw_signal(ResetPasswordFormState::default());
        let can_submit = create_memo(move |_| form.with(|state| state.can_submit()));
        let editable = create_memo(move |_| form.with(|state| state.editable()));

        let vm = Self {
            form,
            can_submit,
            editable,
            token,
            repository,
            toaster,
            connection,
            callbacks,
            timing,
            pending: Rc::new(RefCell::new(None)),
        };

        let pending = vm.pending.clone();
        on_cleanup(move || cancel(&pending));

        vm
    }

    pub fn set_password(&self, text: String) {
        self.form.update(|state| state.set_password(text));
    }

    pub fn set_password_confirmation(&self, text: String) {
        self.form.update(|state| state.set_password_confirmation(text));
    }

    /// Starts a submission and runs it on the local executor.
    pub fn submit(&self) {
        if let Some(task) = self.start_submission() {
            spawn_local(task);
        }
    }

    /// Validates and enters `Submitting`, returning the task that drives the
    /// submission to completion. Returns `None` when nothing was sent.
    pub fn start_submission(&self) -> Option<impl Future<Output = ()> + 'static> {
        let state = self.form.get_untracked();
        // Duplicate submit events (button and Enter key) land here.
        if !state.can_submit() {
            return None;
        }

        if !self.connection.is_connected() {
            self.toaster.show(NO_CONNECTION_MESSAGE);
            return None;
        }

        // The token is opaque: blank means missing, anything else goes out as-is.
        let token = self
            .token
            .get_untracked()
            .filter(|token| !token.trim().is_empty());
        let Some(token) = token else {
            log::warn!("password reset attempted without a token");
            self.form
                .update(|state| state.fail(SubmissionFailure::MissingToken));
            return None;
        };

        if !state.passwords_match() {
            self.form.update(|state| state.reject_confirmation());
            return None;
        }

        self.transition(|state| state.begin_submission());
        log::info!("submitting password reset");

        let repository = self.repository.clone();
        let password = state.password;
        let call = async move { repository.reset_password(token, password).await };
        let (task, handle) = abortable(run_submission(call, self.timing));
        if let Some(previous) = self.pending.borrow_mut().replace(handle) {
            previous.abort();
        }

        let vm = self.clone();
        Some(async move {
            match task.await {
                Ok(outcome) => {
                    vm.pending.borrow_mut().take();
                    match &outcome {
                        Ok(()) => log::info!("password reset succeeded"),
                        Err(failure) => log::info!("password reset failed: {:?}", failure),
                    }
                    vm.transition(|state| state.finish_submission(outcome));
                }
                Err(_) => log::debug!("password reset submission cancelled"),
            }
        })
    }

    /// Cancels the in-flight submission, if any. Its outcome is discarded.
    pub fn cancel_pending(&self) {
        cancel(&self.pending);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Applies `f` and notifies the host when `submitting` flips.
    fn transition(&self, f: impl FnOnce(&mut ResetPasswordFormState)) {
        let Some((before, after)) = self.form.try_update(|state| {
            let before = state.submitting();
            f(state);
            (before, state.submitting())
        }) else {
            return;
        };
        if before == after {
            return;
        }
        let callback = if after {
            self.callbacks.on_start
        } else {
            self.callbacks.on_end
        };
        if let Some(callback) = callback {
            callback.call(());
        }
    }
}

fn cancel(pending: &RefCell<Option<AbortHandle>>) {
    if let Some(handle) = pending.borrow_mut().take() {
        log::debug!("cancelling pending password reset");
        handle.abort();
    }
}
