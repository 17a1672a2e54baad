//! Bounded submission of a password reset.
//!
//! A submission settles on the first of:
//! - the remote call has settled *and* the minimum animation time has elapsed;
//! - the timeout has elapsed.
//!
//! The three sources are driven as discrete events through [`SubmissionRace`].

use crate::{api::ApiError, utils::timer};
use futures::{select_biased, FutureExt};
use std::{future::Future, time::Duration};
use thiserror::Error;

pub const SUBMISSION_ANIMATION_MS: u64 = 2000;
pub const SUBMISSION_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_SUBMISSION_ERROR: &str =
    "Unable to reset password at this time.\nPlease try again later";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionFailure {
    #[error("No reset password token")]
    MissingToken,
    #[error("{0}")]
    Remote(String),
    #[error("{}", DEFAULT_SUBMISSION_ERROR)]
    Unavailable,
    #[error("{}", DEFAULT_SUBMISSION_ERROR)]
    TimedOut,
}

impl SubmissionFailure {
    /// Server-provided reasons are shown as-is; anything else falls back to
    /// the generic message.
    pub fn from_api_error(err: ApiError) -> Self {
        let reason = err.error.trim();
        if err.is_transport() || reason.is_empty() {
            log::warn!(
                "reset password call failed without a usable reason: {} ({})",
                err.error,
                err.code
            );
            Self::Unavailable
        } else {
            Self::Remote(reason.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTiming {
    pub animation: Duration,
    pub timeout: Duration,
}

impl Default for SubmissionTiming {
    fn default() -> Self {
        Self {
            animation: Duration::from_millis(SUBMISSION_ANIMATION_MS),
            timeout: Duration::from_millis(SUBMISSION_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    CallSettled(Result<(), ApiError>),
    AnimationElapsed,
    TimeoutElapsed,
}

#[derive(Debug, Default)]
pub struct SubmissionRace {
    call: Option<Result<(), SubmissionFailure>>,
    animation_elapsed: bool,
    resolved: bool,
}

impl SubmissionRace {
    /// Feeds one event; returns the outcome the first time the race resolves.
    pub fn apply(&mut self, event: SubmissionEvent) -> Option<Result<(), SubmissionFailure>> {
        if self.resolved {
            return None;
        }
        let outcome = match event {
            SubmissionEvent::CallSettled(result) => {
                self.call = Some(result.map_err(SubmissionFailure::from_api_error));
                self.settled()
            }
            SubmissionEvent::AnimationElapsed => {
                self.animation_elapsed = true;
                self.settled()
            }
            SubmissionEvent::TimeoutElapsed => Some(Err(SubmissionFailure::TimedOut)),
        };
        self.resolved = outcome.is_some();
        outcome
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    fn settled(&self) -> Option<Result<(), SubmissionFailure>> {
        if self.animation_elapsed {
            self.call.clone()
        } else {
            None
        }
    }
}

/// Runs `call` against the animation floor and the timeout.
///
/// Dropping the returned future cancels both timers and the call.
pub async fn run_submission<F>(call: F, timing: SubmissionTiming) -> Result<(), SubmissionFailure>
where
    F: Future<Output = Result<(), ApiError>>,
{
    let call = call.fuse();
    let animation = timer::sleep(timing.animation).fuse();
    let timeout = timer::sleep(timing.timeout).fuse();
    futures::pin_mut!(call, animation, timeout);

    let mut race = SubmissionRace::default();
    loop {
        let event = select_biased! {
            result = call => SubmissionEvent::CallSettled(result),
            _ = animation => SubmissionEvent::AnimationElapsed,
            _ = timeout => SubmissionEvent::TimeoutElapsed,
        };
        log::debug!("submission event: {:?}", event);
        if let Some(outcome) = race.apply(event) {
            return outcome;
        }
    }
}
