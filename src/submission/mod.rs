//! Submission orchestration.
//!
//! [`Submitter`] composes the archive builder, the remote path planner and
//! the upload client into one sequential workflow. [`SubmitGate`] is the
//! in-flight flag: it is taken before the workflow starts and released
//! after the upload resolves, so a second submission through the same
//! gate is rejected rather than queued.

mod gate;
mod submitter;

pub use gate::{SubmitGate, SubmitGuard};
pub use submitter::{SubmissionOutcome, Submitter};
