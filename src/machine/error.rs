//! Runtime errors surfaced by a running machine.

use thiserror::Error;

/// Errors that can occur once a machine exists.
///
/// Start-up errors (`AlreadyStarted`, `UnknownState` from `set_start`)
/// leave the machine in its prior state. A bad transition target is
/// non-fatal: the in-flight event continues as if no transition had been
/// requested. `EntryFailed` is surfaced only after the partially entered
/// suffix has been unwound, so the active chain stays consistent.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("machine has already been started")]
    AlreadyStarted,

    #[error("machine has not been started")]
    NotStarted,

    #[error("unknown state '{label}'")]
    UnknownState { label: String },

    #[error("entry of state '{label}' failed: {reason}")]
    EntryFailed { label: String, reason: String },
}

impl FsmError {
    /// Convenience constructor for factories whose entry effect can fail.
    pub fn entry_failed(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EntryFailed {
            label: label.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_state(label: &str) -> Self {
        Self::UnknownState {
            label: label.to_string(),
        }
    }
}
