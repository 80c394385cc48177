//! Session transitions as observed by subscribers

use super::entities::Session;
use serde::{Deserialize, Serialize};

/// Kind of state change the session store went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Initial restoration began
    RestoreStarted,
    /// Initial restoration settled, with or without an identity
    Restored,
    /// Sign-in began
    SignInStarted,
    /// Sign-in established a session
    SignedIn,
    /// Sign-in failed; the previous session is back in place
    SignInFailed,
    /// Sign-out began
    SignOutStarted,
    /// Sign-out cleared the session
    SignedOut,
    /// Display fields were refreshed in place
    Refreshed,
    /// The credential or profile no longer backs the session
    Invalidated,
}

impl Transition {
    /// Stable label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Transition::RestoreStarted => "restore_started",
            Transition::Restored => "restored",
            Transition::SignInStarted => "sign_in_started",
            Transition::SignedIn => "signed_in",
            Transition::SignInFailed => "sign_in_failed",
            Transition::SignOutStarted => "sign_out_started",
            Transition::SignedOut => "signed_out",
            Transition::Refreshed => "refreshed",
            Transition::Invalidated => "invalidated",
        }
    }

    /// Whether this transition leaves the store settled.
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Transition::RestoreStarted | Transition::SignInStarted | Transition::SignOutStarted
        )
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One published transition and the session it produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Position in the store's total order, starting at 1
    pub sequence: u64,
    /// What happened
    pub transition: Transition,
    /// Snapshot after the transition
    pub session: Session,
}
