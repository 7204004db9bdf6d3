//! Push service: drive the push-conflict state machine with real effects.
//!
//! One call is one operation of the machine in `lane_core::push`. The user's
//! rebase/force-push decision is injected as a closure so commands can hook
//! up an interactive prompt and tests can script it.

use lane_core::push::{ConflictChoice, PushEvent, PushState};
use lane_core::BranchSet;
use lane_git::netgate::{GateControl, NetGate};
use lane_git::{CancelToken, GitBackend};

/// Result of one push operation.
#[derive(Debug, Clone)]
pub struct PushReport {
    /// Terminal state of the operation.
    pub state: PushState,
    /// Human-readable detail for the terminal state.
    pub detail: String,
    /// Branch sets rebuilt after the operation.
    pub branches: BranchSet,
}

/// Service pushing branches through the conflict-resolution flow.
pub struct PushService<'a, G: GitBackend> {
    git: &'a G,
}

impl<'a, G: GitBackend> PushService<'a, G> {
    /// Create a new push service.
    #[must_use]
    pub const fn new(git: &'a G) -> Self {
        Self { git }
    }

    /// Push `branch`, resolving a rejection through `choose`.
    ///
    /// `choose` is called at most once, only when the remote rejects the
    /// push; returning `None` abandons the operation (no retry happens
    /// anywhere - a new push is a new user action). Network-dependent steps
    /// run inside the gate.
    pub fn push_with_resolution<C: GateControl>(
        &self,
        branch: &str,
        token: &CancelToken,
        gate: &NetGate<C>,
        choose: impl FnOnce() -> Option<ConflictChoice>,
    ) -> PushReport {
        let mut state = step(PushState::Idle, PushEvent::Start);

        let detail = gate.with_network(|| {
            let out = self.git.push_cancelable(branch, token);

            if out.is_success() {
                state = step(state, PushEvent::PushSucceeded);
                return format!("pushed '{branch}'");
            }
            if token.is_cancelled() {
                state = step(state, PushEvent::PushFailed);
                return "push cancelled".to_string();
            }
            if !out.is_push_rejected() {
                state = step(state, PushEvent::PushFailed);
                return out.err_msg();
            }

            state = step(state, PushEvent::PushRejected);
            match choose() {
                Some(ConflictChoice::Rebase) => {
                    state = step(state, PushEvent::Chose(ConflictChoice::Rebase));
                    self.run_rebase(branch, &mut state)
                }
                Some(ConflictChoice::ForcePush) => {
                    state = step(state, PushEvent::Chose(ConflictChoice::ForcePush));
                    let out = self.git.force_push_with_lease(branch);
                    if out.is_success() {
                        state = step(state, PushEvent::ForcePushSucceeded);
                        format!("force-pushed '{branch}' (with lease)")
                    } else {
                        state = step(state, PushEvent::ForcePushFailed);
                        out.err_msg()
                    }
                }
                None => "push rejected - no resolution chosen".to_string(),
            }
        });

        PushReport {
            state,
            detail,
            branches: BranchSet::from_lists(
                self.git.local_branches(),
                self.git.remote_branches(),
            ),
        }
    }

    /// Rebase onto the branch's own remote counterpart after a rejection.
    fn run_rebase(&self, branch: &str, state: &mut PushState) -> String {
        let target = format!("{}/{branch}", self.git.remote_name());
        let out = self.git.rebase_onto(&target);

        if out.is_success() {
            *state = step(*state, PushEvent::RebaseClean);
            format!("rebased '{branch}' onto {target} - push again when ready")
        } else if out.has_conflict() {
            *state = step(*state, PushEvent::RebaseConflict);
            "rebase stopped on conflicts - resolve them, then `lane rebase --continue`"
                .to_string()
        } else {
            *state = step(*state, PushEvent::RebaseFailed);
            out.err_msg()
        }
    }
}

/// Transitions driven here are all legal by construction; an illegal one
/// would be a bug in the driver, and the machine's answer is to stay put.
fn step(state: PushState, event: PushEvent) -> PushState {
    state.advance(event).unwrap_or(state)
}
