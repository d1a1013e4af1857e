//! Submission state machine.

use tracing::debug;

use crate::error::CheckoutError;

/// State of the order submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionState {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Running exhaustive form validation.
    Validating,
    /// Order call in flight; the submit control is disabled.
    Submitting,
    /// Backend accepted the order.
    Succeeded,
    /// Backend rejected the order or the call errored; retry permitted.
    Failed,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        }
    }

    /// Check if a submission is currently being processed.
    ///
    /// While in flight, a second submit must be rejected.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Validating | SubmissionState::Submitting)
    }
}

/// Enumerated-transition wrapper around [`SubmissionState`].
///
/// Independent of any rendering mechanism so the submission flow can be
/// unit-tested without a UI harness.
#[derive(Debug, Default)]
pub struct SubmissionMachine {
    state: SubmissionState,
}

impl SubmissionMachine {
    /// Create a machine in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Check if a transition is legal.
    pub fn can_transition(from: SubmissionState, to: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (from, to),
            (Idle, Validating)
                | (Failed, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }

    /// Perform a transition, rejecting illegal ones.
    pub fn transition(&mut self, to: SubmissionState) -> Result<(), CheckoutError> {
        if !Self::can_transition(self.state, to) {
            return Err(CheckoutError::InvalidTransition {
                from: self.state.as_str(),
                to: to.as_str(),
            });
        }
        debug!(from = self.state.as_str(), to = to.as_str(), "submission transition");
        self.state = to;
        Ok(())
    }
}
