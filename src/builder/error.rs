//! Build errors for machine construction.

use thiserror::Error;

/// Errors that can occur while registering the state tree.
///
/// All of these are raised synchronously during machine construction;
/// a machine whose construction failed is never handed to the caller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("state '{label}' is already registered")]
    DuplicateState { label: String },

    #[error("state '{state}' names unregistered parent '{parent}'")]
    UnknownParent { state: String, parent: String },

    #[error("parent chain of state '{label}' contains a cycle")]
    CycleDetected { label: String },
}
