use super::submission::SubmissionFailure;
use crate::utils::validation::check_password_complexity;

pub const PASSWORD_CONFIRMATION_ERROR: &str = "Passwords don't match";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed(SubmissionFailure),
}

/// Local state of the reset-password form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPasswordFormState {
    pub password: String,
    pub password_validated: bool,
    pub password_error: Option<String>,
    pub password_confirmation: String,
    pub password_confirmation_validated: bool,
    pub password_confirmation_error: Option<String>,
    pub submission: SubmissionPhase,
}

impl Default for ResetPasswordFormState {
    fn default() -> Self {
        Self {
            password: String::new(),
            password_validated: true,
            password_error: None,
            password_confirmation: String::new(),
            password_confirmation_validated: true,
            password_confirmation_error: None,
            submission: SubmissionPhase::Idle,
        }
    }
}

impl ResetPasswordFormState {
    pub fn submitting(&self) -> bool {
        self.submission == SubmissionPhase::Submitting
    }

    pub fn submitted(&self) -> bool {
        self.submission == SubmissionPhase::Submitted
    }

    pub fn editable(&self) -> bool {
        !(self.submitting() || self.submitted())
    }

    pub fn submission_error(&self) -> Option<String> {
        match &self.submission {
            SubmissionPhase::Failed(failure) => Some(failure.to_string()),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.password.is_empty()
            && self.password_validated
            && !self.password_confirmation.is_empty()
            && !self.submitting()
            && !self.submitted()
    }

    pub fn set_password(&mut self, text: String) {
        let validation = check_password_complexity(&text);
        self.password = text;
        self.password_validated = validation.validated;
        self.password_error = validation.error;
    }

    pub fn set_password_confirmation(&mut self, text: String) {
        self.password_confirmation = text;
        self.password_confirmation_validated = true;
        self.password_confirmation_error = None;
    }

    pub fn passwords_match(&self) -> bool {
        self.password == self.password_confirmation
    }

    pub fn reject_confirmation(&mut self) {
        self.password_confirmation_validated = false;
        self.password_confirmation_error = Some(PASSWORD_CONFIRMATION_ERROR.to_string());
    }

    pub fn fail(&mut self, failure: SubmissionFailure) {
        self.submission = SubmissionPhase::Failed(failure);
    }

    /// Enters `Submitting`, dropping any previous failure.
    pub fn begin_submission(&mut self) {
        self.submission = SubmissionPhase::Submitting;
    }

    /// Applies the outcome of a submission; ignored unless currently submitting.
    pub fn finish_submission(&mut self, outcome: Result<(), SubmissionFailure>) {
        if !self.submitting() {
            return;
        }
        self.submission = match outcome {
            Ok(()) => SubmissionPhase::Submitted,
            Err(failure) => SubmissionPhase::Failed(failure),
        };
    }
}
