//! Consultation lifecycle of a report: `private → requested → reviewed`.
//!
//! Transitions only move forward, one step at a time. Re-opening a reviewed
//! chat is a no-op; every other repeat, skip or backward move is an error.

use thiserror::Error;

use crate::models::{ConsultationStatus, Role};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot move consultation from {from} to {to}")]
pub struct TransitionError {
    pub from: ConsultationStatus,
    pub to: ConsultationStatus,
}

impl ConsultationStatus {
    fn rank(&self) -> u8 {
        match self {
            ConsultationStatus::Private => 0,
            ConsultationStatus::Requested => 1,
            ConsultationStatus::Reviewed => 2,
        }
    }

    /// Only the next step is reachable.
    pub fn can_transition_to(&self, to: ConsultationStatus) -> bool {
        to.rank() == self.rank() + 1
    }

    /// Compute the result of moving to `to`.
    ///
    /// Returns `Ok(false)` when already in `to`, `Ok(true)` on a forward step.
    pub fn transition(&self, to: ConsultationStatus) -> Result<bool, TransitionError> {
        if *self == to {
            return Ok(false);
        }
        if self.can_transition_to(to) {
            Ok(true)
        } else {
            Err(TransitionError { from: *self, to })
        }
    }
}

/// Patient asks for a doctor. Only valid from `private`.
pub fn request(status: ConsultationStatus) -> Result<(), TransitionError> {
    if status.can_transition_to(ConsultationStatus::Requested) {
        Ok(())
    } else {
        Err(TransitionError {
            from: status,
            to: ConsultationStatus::Requested,
        })
    }
}

/// Doctor opens the chat. `requested → reviewed`; already reviewed is a no-op.
pub fn open_chat(status: ConsultationStatus) -> Result<bool, TransitionError> {
    status.transition(ConsultationStatus::Reviewed)
}

/// Whether a participant with `role` may post a chat message in `status`.
///
/// Doctors may write once a consultation is requested (writing opens it);
/// patients only after it has been reviewed.
pub fn chat_allowed(status: ConsultationStatus, role: Role) -> bool {
    match role {
        Role::Doctor => status != ConsultationStatus::Private,
        Role::Patient => status == ConsultationStatus::Reviewed,
    }
}
