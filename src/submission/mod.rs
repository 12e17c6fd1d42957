//! Submission Module
//!
//! Asynchronous form submission with busy-state scoping and centralized
//! failure handling.

mod busy;
mod handler;
mod submitter;

pub use busy::{BusyGuard, BusyTracker};
pub use handler::{FormHandler, SubmitError, SUBMISSION_CONTEXT, SUCCESS_MESSAGE};
pub use submitter::{FormData, FormSubmitter, SimulatedSubmitter};
