//! Push-conflict resolution state machine.
//!
//! Models one push operation: `Idle -> Pushing -> (Success | Rejected)`.
//! A rejected push offers a binary choice - rebase onto the remote counterpart
//! or force-push with lease. The machine is pure; services feed it events from
//! real git output.

use std::fmt;

/// User decision after a rejected push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Rebase onto the remote counterpart, then let the user push again.
    Rebase,
    /// Push with `--force-with-lease`.
    ForcePush,
}

/// States of a single push operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushState {
    /// Nothing started yet.
    Idle,
    /// The push child process is running.
    Pushing,
    /// The operation concluded successfully.
    Success,
    /// The remote rejected the push; awaiting the user's choice.
    Rejected,
    /// Rebasing onto the remote counterpart after a rejection.
    Rebasing,
    /// Force-pushing with lease after a rejection.
    ForcePushing,
    /// The rebase hit conflicts; manual resolution required before any
    /// further automated action.
    ConflictDetected,
    /// The operation failed for a reason other than conflicts.
    Failure,
}

impl PushState {
    /// Whether the operation has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::ConflictDetected | Self::Failure)
    }
}

impl fmt::Display for PushState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Pushing => "pushing",
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::Rebasing => "rebasing",
            Self::ForcePushing => "force-pushing",
            Self::ConflictDetected => "conflict-detected",
            Self::Failure => "failure",
        };
        write!(f, "{label}")
    }
}

/// Events fed into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushEvent {
    /// Start the push.
    Start,
    /// The push child exited successfully.
    PushSucceeded,
    /// The push output contained the rejection marker.
    PushRejected,
    /// The push failed for any other reason.
    PushFailed,
    /// The user picked a resolution for the rejection.
    Chose(ConflictChoice),
    /// The rebase completed without conflicts.
    RebaseClean,
    /// The rebase stopped on conflicts.
    RebaseConflict,
    /// The rebase failed outright.
    RebaseFailed,
    /// The force-push exited successfully.
    ForcePushSucceeded,
    /// The force-push failed.
    ForcePushFailed,
}

/// An event that is not legal in the current state. The state is left
/// unchanged; callers decide whether to treat this as a bug or ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("push event {event:?} is not valid in state {state}")]
pub struct IllegalTransition {
    /// State the machine was in.
    pub state: PushState,
    /// The rejected event.
    pub event: PushEvent,
}

impl PushState {
    /// Apply an event, returning the next state.
    ///
    /// # Errors
    /// Returns [`IllegalTransition`] when the event is not valid for the
    /// current state; the machine stays where it was.
    pub const fn advance(self, event: PushEvent) -> Result<Self, IllegalTransition> {
        use PushEvent as E;
        use PushState as S;

        let next = match (self, event) {
            (S::Idle, E::Start) => S::Pushing,
            (S::Pushing, E::PushSucceeded) => S::Success,
            (S::Pushing, E::PushRejected) => S::Rejected,
            (S::Pushing, E::PushFailed) => S::Failure,
            (S::Rejected, E::Chose(ConflictChoice::Rebase)) => S::Rebasing,
            (S::Rejected, E::Chose(ConflictChoice::ForcePush)) => S::ForcePushing,
            (S::Rebasing, E::RebaseClean) => S::Success,
            (S::Rebasing, E::RebaseConflict) => S::ConflictDetected,
            (S::Rebasing, E::RebaseFailed) => S::Failure,
            (S::ForcePushing, E::ForcePushSucceeded) => S::Success,
            (S::ForcePushing, E::ForcePushFailed) => S::Failure,
            (state, event) => return Err(IllegalTransition { state, event }),
        };
        Ok(next)
    }
}
