//! Bounded-retry state machine for PIN entry.
//!
//! ```text
//! Attempting(n) --match--------------> Authorized
//! Attempting(n) --mismatch, n < max--> Attempting(n + 1)
//! Attempting(n) --mismatch, n = max--> Locked
//! ```
//!
//! `Authorized` and `Locked` are terminal.

/// Where a PIN check currently stands.  `Attempting(n)` means attempt
/// number `n` (1-based) is about to be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Attempting(u32),
    Authorized,
    Locked,
}

impl AttemptState {
    pub fn start() -> Self {
        Self::Attempting(1)
    }

    /// Feed the outcome of the current attempt.
    pub fn advance(self, matched: bool, max_attempts: u32) -> Self {
        match self {
            Self::Attempting(_) if matched => Self::Authorized,
            Self::Attempting(n) if n >= max_attempts => Self::Locked,
            Self::Attempting(n) => Self::Attempting(n + 1),
            terminal => terminal,
        }
    }
}
