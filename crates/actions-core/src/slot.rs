//! Tri-state memo cell

use crate::{SessionError, SessionResult};

/// One memoized session step.
///
/// `Unresolved` means the step was never attempted; `Failed` means it was
/// attempted and must not be retried within the same session.
#[derive(Debug, Clone)]
pub enum Slot<T> {
    Unresolved,
    Resolved(T),
    Failed(SessionError),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Unresolved
    }
}

impl<T: Clone> Slot<T> {
    /// The cached outcome, or `None` if the step has not run.
    pub fn get(&self) -> Option<SessionResult<T>> {
        match self {
            Slot::Unresolved => None,
            Slot::Resolved(value) => Some(Ok(value.clone())),
            Slot::Failed(err) => Some(Err(err.clone())),
        }
    }

    /// Record the outcome of the step and hand it back.
    pub fn settle(&mut self, outcome: SessionResult<T>) -> SessionResult<T> {
        *self = match &outcome {
            Ok(value) => Slot::Resolved(value.clone()),
            Err(err) => Slot::Failed(err.clone()),
        };
        outcome
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Slot::Unresolved)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Slot::Failed(_))
    }
}
