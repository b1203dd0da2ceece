//! Session state machine used by the orchestrator.

/// Whether a run currently holds a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn,
}

/// What an operation needs before it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequirement {
    /// Runs in any state (login).
    None,
    /// Needs a session; the orchestrator logs in first when there is none.
    Active,
    /// Acts on the existing session and is never auto-satisfied (logout).
    Existing,
}

/// How an operation changes the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    Opens,
    Closes,
    Preserves,
}

impl SessionState {
    pub fn is_logged_in(self) -> bool {
        self == SessionState::LoggedIn
    }

    /// Whether `requirement` must be satisfied by an implicit login first.
    pub fn needs_login(self, requirement: SessionRequirement) -> bool {
        requirement == SessionRequirement::Active && self == SessionState::LoggedOut
    }

    /// State after an operation with `effect` finished.
    ///
    /// Closing always ends in `LoggedOut`, even when the remote call failed,
    /// because the client drops its token in either case.
    pub fn apply(self, effect: SessionEffect, succeeded: bool) -> Self {
        match effect {
            SessionEffect::Opens if succeeded => SessionState::LoggedIn,
            SessionEffect::Opens => self,
            SessionEffect::Closes => SessionState::LoggedOut,
            SessionEffect::Preserves => self,
        }
    }
}
