// Per-connection game flags and the client lifecycle derived from them.

/// Flags tracked for the lifetime of a single server connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameState {
    // Gameplay in progress as reported by the server (game start/over notifications).
    pub active: bool,
    // Greeting already sent on this connection; never reset.
    pub greeted: bool,
}

/// Change to the active flag requested by a classified server notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateMutation {
    Activate,
    Deactivate,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a mutation and reports whether the active flag actually changed.
    pub fn apply(&mut self, mutation: StateMutation) -> bool {
        let active = matches!(mutation, StateMutation::Activate);
        let changed = self.active != active;
        self.active = active;
        changed
    }

    /// Marks the greeting as sent. Returns `true` only the first time.
    pub fn mark_greeted(&mut self) -> bool {
        !std::mem::replace(&mut self.greeted, true)
    }
}

/// Client lifecycle: `Connecting -> Connected -> (Active | Inactive) -> Closed`.
///
/// `Connecting` covers the TCP connect attempt; a session always starts out `Connected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPhase {
    Connecting,
    Connected,
    Active,
    Inactive,
    Closed,
}

impl ClientPhase {
    pub fn connected(self) -> Self {
        match self {
            ClientPhase::Connecting => ClientPhase::Connected,
            other => other,
        }
    }

    pub fn on_mutation(self, mutation: StateMutation) -> Self {
        match (self, mutation) {
            // Closure is terminal; late notifications cannot revive the client.
            (ClientPhase::Closed, _) => ClientPhase::Closed,
            (ClientPhase::Connecting, _) => ClientPhase::Connecting,
            (_, StateMutation::Activate) => ClientPhase::Active,
            (_, StateMutation::Deactivate) => ClientPhase::Inactive,
        }
    }

    pub fn close(self) -> Self {
        ClientPhase::Closed
    }

    pub fn is_closed(self) -> bool {
        self == ClientPhase::Closed
    }
}
