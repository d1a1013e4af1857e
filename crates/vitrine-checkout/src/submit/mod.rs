//! Order submission: state machine and submitter.

mod state;
mod submitter;

pub use state::{SubmissionMachine, SubmissionState};
pub use submitter::OrderSubmitter;
